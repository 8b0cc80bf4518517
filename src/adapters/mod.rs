// Adapters layer: concrete implementations for external systems (lookup providers, chat transport).

pub mod lookup;
pub mod telegram;
