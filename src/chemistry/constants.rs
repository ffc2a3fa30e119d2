// Purpose: To store physical constants used in m/z arithmetic
pub const MASS_PROTON: f64 = 1.007276466812; // Unified atomic mass unit
pub const MASS_WATER: f64 = 18.010564684; // Unified atomic mass unit
pub const MASS_H_ATOM: f64 = 1.00784; // Unified atomic mass unit

// Terminal modification mass deltas, applied to the C-terminal (y) series only
pub const AMIDATION_DELTA: f64 = -0.984016; // C-terminal amidation
pub const DEHYDRATION_DELTA: f64 = -18.010564684; // net loss of water
pub const DECARBOXYLATION_LOSS: f64 = 29.0022; // daptide y-ion decarboxylation
