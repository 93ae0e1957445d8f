pub mod field_name;
