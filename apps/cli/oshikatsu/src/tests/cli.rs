use crate::cli::{Cli, Command, GroupFieldArgs, GroupsCommand, SearchArgs};
use crate::commands::groups::apply_fields;

use client_core::validation::OshiGroupForm;
use client_core::workflow::SearchKind;

use clap::Parser;

#[test]
fn given_search_flags_when_parsed_then_form_defaults_to_full_match() {
    let cli = Cli::try_parse_from(["oshikatsu", "groups", "search", "--query", "ホロ"]).unwrap();

    let Command::Groups(GroupsCommand::Search(args)) = cli.command else {
        panic!("expected groups search");
    };
    let form = args.to_form();
    assert_eq!(form.kind, SearchKind::GroupName);
    assert!(form.full && !form.fuzzy);
    assert_eq!(form.query, "ホロ");
}

/// **VALUE**: Passing both mode flags reaches the workflow unchanged.
///
/// **WHY THIS MATTERS**: The conflict must be reported by validation with its
/// message, not silently resolved by the argument parser.
#[test]
fn given_full_and_fuzzy_when_converted_then_both_stay_selected() {
    let args = SearchArgs {
        query: "x".to_string(),
        by_company: false,
        full: true,
        fuzzy: true,
    };

    let form = args.to_form();

    assert!(form.full && form.fuzzy);
}

#[test]
fn given_edit_command_when_parsed_then_id_search_and_fields_are_captured() {
    let cli = Cli::try_parse_from([
        "oshikatsu",
        "--json",
        "groups",
        "edit",
        "--id",
        "3",
        "--query",
        "カバー",
        "--by-company",
        "--description",
        "新しい説明",
    ])
    .unwrap();

    assert!(cli.json);
    let Command::Groups(GroupsCommand::Edit { id, search, fields }) = cli.command else {
        panic!("expected groups edit");
    };
    assert_eq!(id, 3);
    assert_eq!(search.to_form().kind, SearchKind::Company);
    assert_eq!(fields.description.as_deref(), Some("新しい説明"));
    assert!(fields.group_name.is_none());
}

#[test]
fn given_partial_fields_when_applied_then_unset_fields_keep_prefill() {
    let mut form = OshiGroupForm {
        group_name: "ホロライブ".to_string(),
        company: "カバー株式会社".to_string(),
        description: "旧".to_string(),
    };
    let fields = GroupFieldArgs {
        group_name: None,
        company: Some(String::new()),
        description: Some("新".to_string()),
    };

    apply_fields(&mut form, &fields);

    assert_eq!(form.group_name, "ホロライブ");
    assert_eq!(form.company, "");
    assert_eq!(form.description, "新");
}
