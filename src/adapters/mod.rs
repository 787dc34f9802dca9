// Adapters layer: concrete implementations for external systems (model API, storage).

pub mod llm;
pub mod storage;
