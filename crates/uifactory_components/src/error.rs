#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("Template parse error in '{field_type}': {message}")]
    TemplateParse { field_type: String, message: String },

    #[error("Template render error in '{field_type}': {message}")]
    TemplateRender { field_type: String, message: String },

    #[error("Unknown component type: {0}")]
    UnknownType(String),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Template engine error: {0}")]
    Engine(String),
}

pub type ComponentResult<T> = Result<T, ComponentError>;
