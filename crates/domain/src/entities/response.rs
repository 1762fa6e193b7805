//! Response entity

/// Successful result of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    payload: Vec<u8>,
}

impl Response {
    /// Create a response with an explicit status code
    #[must_use]
    pub const fn new(status: u16, payload: Vec<u8>) -> Self {
        Self { status, payload }
    }

    /// Create a `200 OK` response
    #[must_use]
    pub const fn ok(payload: Vec<u8>) -> Self {
        Self::new(200, payload)
    }

    /// Status code reported by the provider
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Raw payload bytes
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_200() {
        let resp = Response::ok(b"hello".to_vec());
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.payload(), b"hello");
    }
}
