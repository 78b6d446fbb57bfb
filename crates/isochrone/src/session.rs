//! Last-writer-wins tracking for in-flight score requests.
//!
//! Nothing cancels an isochrone fetch once it is on the wire, so selecting
//! another parcel while one is pending can complete out of order. The
//! session hands out a token per request and only accepts the result
//! carrying the newest token; stale completions are dropped.

/// Token identifying one score request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Single-threaded score state for the active parcel
#[derive(Debug, Default)]
pub struct ScoreSession {
    latest: u64,
    score: Option<u8>,
}

impl ScoreSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new score request, superseding any outstanding one
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Record the result of a request. Returns `false` and changes nothing
    /// when a newer request has been started since `token` was issued.
    pub fn complete(&mut self, token: RequestToken, score: Option<u8>) -> bool {
        if token.0 != self.latest {
            return false;
        }
        self.score = score;
        true
    }

    /// The score from the most recent completed request, if any
    pub fn score(&self) -> Option<u8> {
        self.score
    }

    /// Drop the displayed score (selection cleared)
    pub fn clear(&mut self) {
        self.score = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_request_wins() {
        let mut session = ScoreSession::new();

        let first = session.begin();
        let second = session.begin();

        assert!(session.complete(second, Some(80)));
        assert_eq!(session.score(), Some(80));

        // The superseded request lands afterwards and is ignored
        assert!(!session.complete(first, Some(12)));
        assert_eq!(session.score(), Some(80));
    }

    #[test]
    fn test_in_order_completion() {
        let mut session = ScoreSession::new();

        let token = session.begin();
        assert!(session.complete(token, Some(55)));
        assert_eq!(session.score(), Some(55));

        let token = session.begin();
        assert!(session.complete(token, None)); // empty geometry: no score
        assert_eq!(session.score(), None);
    }

    #[test]
    fn test_clear_drops_score() {
        let mut session = ScoreSession::new();
        let token = session.begin();
        session.complete(token, Some(42));

        session.clear();
        assert_eq!(session.score(), None);
    }
}
