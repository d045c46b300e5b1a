// Service module exports

pub mod layout;
pub mod navigation;
pub mod popover; // Anchored overlay positioning
pub mod settings;
