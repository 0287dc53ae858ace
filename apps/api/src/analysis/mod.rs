// CV Analysis: ingestion, prompting, generation and critique parsing.
// Generation goes through the `Generator` trait in llm_client.

pub mod analyzer;
pub mod critique;
pub mod handlers;
pub mod prompts;
