pub mod impact;
pub mod orchestrator;
pub mod rewriter;
