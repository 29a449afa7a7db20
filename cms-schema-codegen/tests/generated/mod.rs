// `generate_for_schema` output for two catalog entities, kept in sync by
// `generated_files_are_current`.

pub mod blog_post;
pub mod service;
