pub mod find_user_name;
