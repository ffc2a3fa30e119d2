// chemistry module
pub mod chemistry {
    pub mod amino_acid;
    pub mod constants;
    pub mod modification;
}

// algorithm module
pub mod algorithm {
    pub mod average;
    pub mod cluster;
    pub mod fragment;
    pub mod matching;
}

// data module
pub mod data {
    pub mod ion;
    pub mod scan;
    pub mod spectrum;
}

pub mod error;
