// AI proxy: prompt construction, one generator call per request, and lenient
// reinterpretation of the model's free text.

pub mod handlers;
pub mod parse;
pub mod prompts;
