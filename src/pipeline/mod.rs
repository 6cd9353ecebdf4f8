pub mod import;
pub mod extraction;
pub mod prompt_templates;
