//! Supplier outreach and crisis signalling.
//!
//! The external language backends sit behind [`TextGenerator`] and
//! [`CrisisClassifier`]. Everything here degrades to placeholder text or
//! "no crisis" when a backend is absent or failing.

pub mod brief;
pub mod composer;
pub mod crisis;
pub mod generator;
pub mod reply;
pub mod result;

pub use brief::{CrisisSummary, NeedSummary, OutreachBrief, UrgencyTier};
pub use composer::{ComposerConfig, OutreachComposer, DEFAULT_BATCH_SIZE, DEFAULT_CALL_TIMEOUT};
pub use crisis::{detect_crisis, CrisisDetector, CrisisSignal};
pub use generator::{CrisisClassifier, DisabledGenerator, TextGenerator};
pub use reply::{parse_reply, MessageText, ParsedReply, BODY_PLACEHOLDER, SUBJECT_PLACEHOLDER};
pub use result::{AiError, OutreachResult};
