//! Fixed policy vocabularies

/// Domain-relevance allow-list for incoming questions.
///
/// Matched as lower-case substrings, so a term inside a longer word counts
/// ("sum" matches "summer"). The looseness is accepted policy.
pub const MATH_KEYWORDS: &[&str] = &[
    "math", "mathematics", "algebra", "geometry", "calculus",
    "trigonometry", "probability", "statistics", "integral", "derivative",
    "equation", "formula", "function", "sum", "solve", "proof",
    "differential", "limit", "series", "logarithm", "matrix", "vector",
    "quadratic", "set", "relation", "permutation", "combination", "sequence",
    "progression", "definite", "indefinite", "area", "volume", "complex",
    "number", "domain", "range", "inverse", "linear", "polynomial",
    "rational", "exponent", "continuity", "maxima", "minima", "tangent",
    "normal", "locus", "partial", "system", "scalar", "modulus",
    "argument", "identity", "inequality", "ellipse", "parabola",
    "hyperbola", "circle", "coordinate", "jacobian", "fourier",
    "laplace", "sinc", "cosh", "sinh", "calculate", "find", "prove",
    "explain", "concept", "theorem", "principle", "law", "graph",
    "diagram", "approximately", "calculate",
];

/// Case-sensitive markers that suppress a generated answer.
pub const BANNED_OUTPUT_PATTERNS: &[&str] = &["http", "malicious"];
