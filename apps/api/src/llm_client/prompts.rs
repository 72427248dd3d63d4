// Cross-cutting prompt fragments shared by the AI endpoints.
// Endpoint-specific templates live in ai/prompts.rs.

/// Appended to prompts whose output must be ATS-friendly.
pub const ATS_INSTRUCTION: &str = "Make the resume professional, well-organized, \
    and optimized for applicant tracking systems (ATS).";

/// Persona line for prompts that draft resume content.
pub const WRITER_PERSONA: &str = "You are a professional resume writer.";
