diesel::table! {
    #[sql_name = "todo"]
    todos (id) {
        id -> Integer,
        todo -> Nullable<Text>,
        priority -> Nullable<Text>,
        status -> Nullable<Text>,
        category -> Nullable<Text>,
        due_date -> Nullable<Text>,
    }
}
