mod oshi_group;
