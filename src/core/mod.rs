pub mod buddy;
pub mod pairing;
pub mod roster;
pub mod workflow;

pub use crate::domain::model::{
    MemberProfile, Pair, Pairing, Participant, ProfileErrorPolicy, Report, Roster,
};
pub use crate::domain::ports::{ConfigProvider, GroupStore, MemberDirectory, ReportSender};
pub use crate::utils::error::Result;
