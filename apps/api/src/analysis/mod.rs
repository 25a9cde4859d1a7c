// Scoring pipeline: normalize → segment → resolve JD skills → score → gap analysis.
// Everything below `handlers` is pure and synchronous; the HTTP layer only wires it up.

pub mod engine;
pub mod handlers;
pub mod jd_resolver;
pub mod models;
pub mod normalize;
pub mod ontology;
pub mod scoring;
pub mod segmenter;
pub mod similarity;
pub mod skill_gap;
