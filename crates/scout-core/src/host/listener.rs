//! Outbound notifications to the UI layer.

/// Non-fatal conditions surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The selected candidate could not be played. Candidate state is untouched.
    PlaybackFailed { url: String, reason: String },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::PlaybackFailed { url, reason } => write!(f, "playback error for {url}: {reason}"),
        }
    }
}

/// Receives the ranked list whenever it changes.
pub trait CandidatesListener {
    fn on_candidates_changed(&mut self, ranked: &[String]);

    fn on_notice(&mut self, _notice: &Notice) {}
}

/// Keeps every list and notice it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    pub lists: Vec<Vec<String>>,
    pub notices: Vec<Notice>,
}

impl RecordingListener {
    pub fn last(&self) -> Option<&[String]> {
        self.lists.last().map(Vec::as_slice)
    }
}

impl CandidatesListener for RecordingListener {
    fn on_candidates_changed(&mut self, ranked: &[String]) {
        self.lists.push(ranked.to_vec());
    }

    fn on_notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
