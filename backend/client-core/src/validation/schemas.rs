//! The four form schemas. Limits match the backend's request DTO constraints.

use super::{FieldSchema, FormValues, Schema};

use once_cell::sync::Lazy;

pub const USERNAME_REQUIRED: &str = "ユーザー名を入力してください";
pub const USERNAME_TOO_SHORT: &str = "ユーザー名は3文字以上で入力してください";
pub const USERNAME_TOO_LONG: &str = "ユーザー名は50文字以内で入力してください";
pub const EMAIL_REQUIRED: &str = "メールアドレスを入力してください";
pub const EMAIL_INVALID: &str = "有効なメールアドレスを入力してください";
pub const PASSWORD_REQUIRED: &str = "パスワードを入力してください";
pub const GROUP_NAME_REQUIRED: &str = "グループ名を入力してください";
pub const DESCRIPTION_TOO_LONG: &str = "説明は1000文字以内で入力してください";
pub const SEARCH_MODE_REQUIRED: &str = "全文一致かあいまい検索のどちらかを選択してください";
pub const SEARCH_MODE_CONFLICT: &str = "全文一致とあいまい検索は同時に選択できません";

pub const DESCRIPTION_MAX_CHARS: usize = 1000;

pub static LOGIN_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .field(FieldSchema::text("username").min(1, USERNAME_REQUIRED))
        .field(FieldSchema::text("password").min(1, PASSWORD_REQUIRED))
});

pub static REGISTER_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .field(
            FieldSchema::text("username")
                .min(3, USERNAME_TOO_SHORT)
                .max(50, USERNAME_TOO_LONG),
        )
        .field(
            FieldSchema::text("email")
                .min(1, EMAIL_REQUIRED)
                .email(EMAIL_INVALID),
        )
        .field(FieldSchema::text("password").min(1, PASSWORD_REQUIRED))
});

pub static OSHI_GROUP_FORM_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .field(FieldSchema::text("groupName").min(1, GROUP_NAME_REQUIRED))
        .field(FieldSchema::text("company").optional())
        .field(
            FieldSchema::text("description")
                .optional()
                .max(DESCRIPTION_MAX_CHARS, DESCRIPTION_TOO_LONG),
        )
});

/// Full-match and fuzzy are mutually exclusive: exactly one must be selected.
pub static SEARCH_MODE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .field(FieldSchema::flag("full"))
        .field(FieldSchema::flag("fuzzy"))
        .refine(SEARCH_MODE_REQUIRED, |values: &FormValues| {
            values.flag("full") == Some(true) || values.flag("fuzzy") == Some(true)
        })
        .refine(SEARCH_MODE_CONFLICT, |values: &FormValues| {
            !(values.flag("full") == Some(true) && values.flag("fuzzy") == Some(true))
        })
});
