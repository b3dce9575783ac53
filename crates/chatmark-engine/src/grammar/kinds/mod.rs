//! One module per rule kind. Each owns its delimiters and exposes a
//! matcher and a node builder for the rule table in [`crate::grammar`].

pub mod block_quote;
pub mod code_fence;
pub mod emoji;
pub mod emphasis;
pub mod escape;
pub mod inline_code;
pub mod newline;
pub mod paragraph;
pub mod quoted_fence;
pub mod service_decoration;
pub mod text;
