//! Client side of the proposal workflow: drafts, votes and optimistic updates.

pub mod draft;
pub mod optimistic;
pub mod vote;

pub use draft::{DraftError, PropertyRow, ProposalDraft, delete_edge_request, delete_node_request};
pub use optimistic::{OptimisticMutation, StateCell};
pub use vote::{VoteBoard, VoteError, VoteLedger, VotePlan, vote_mutation};
