pub mod token {
    /// Literal first field of every bearer token.
    pub const PREFIX: &str = "mern";

    pub const DELIMITER: char = '-';

    /// Random bytes per login nonce, rendered as twice as many hex chars.
    pub const NONCE_BYTES: usize = 8;
}

pub mod headers {

    pub const API_KEY: &str = "X-Api-Key";

    pub const BEARER_PREFIX: &str = "Bearer ";
}
