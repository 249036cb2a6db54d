// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod forms;
pub mod model;
pub mod pipeline;
pub mod state;
pub mod transfer;

pub use forms::*;
pub use model::*;
pub use pipeline::*;
pub use state::*;
pub use transfer::*;
