//! Per-user vote bookkeeping with toggle semantics.
//!
//! Clicking the button matching the current vote clears it. The ledger
//! remembers the last value this client cast on each proposal and refuses a
//! second vote on a proposal whose previous vote is still in flight.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::optimistic::OptimisticMutation;
use crate::api::{GraphProposals, ProposalKey, VoteValue};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VoteError {
	#[error("You must be logged in to vote.")]
	NotLoggedIn,
	#[error("A vote on this proposal is already in progress.")]
	InFlight,
}

/// What one click will do: the vote moves from `previous` to `next`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VotePlan {
	pub key: ProposalKey,
	pub previous: VoteValue,
	pub next: VoteValue,
}

impl VotePlan {
	pub fn upvote_delta(&self) -> i64 {
		(self.next == VoteValue::Up) as i64 - (self.previous == VoteValue::Up) as i64
	}

	pub fn downvote_delta(&self) -> i64 {
		(self.next == VoteValue::Down) as i64 - (self.previous == VoteValue::Down) as i64
	}

	/// Change of the net score (upvotes minus downvotes).
	pub fn score_delta(&self) -> i64 {
		(self.next.as_i8() - self.previous.as_i8()) as i64
	}

	pub fn success_message(&self) -> &'static str {
		match self.next {
			VoteValue::Up => "Upvoted!",
			VoteValue::Down => "Downvoted!",
			VoteValue::None => "Vote cleared!",
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoteLedger {
	votes: HashMap<ProposalKey, VoteValue>,
	in_flight: HashSet<ProposalKey>,
}

impl VoteLedger {
	pub fn current(&self, key: &ProposalKey) -> VoteValue {
		self.votes.get(key).copied().unwrap_or_default()
	}

	pub fn is_in_flight(&self, key: &ProposalKey) -> bool {
		self.in_flight.contains(key)
	}

	/// Work out the transition for clicking `clicked` without changing anything.
	pub fn plan(&self, key: &ProposalKey, clicked: VoteValue) -> Result<VotePlan, VoteError> {
		if self.is_in_flight(key) {
			return Err(VoteError::InFlight);
		}
		let previous = self.current(key);
		let next = if previous == clicked {
			VoteValue::None
		} else {
			clicked
		};
		Ok(VotePlan {
			key: key.clone(),
			previous,
			next,
		})
	}

	/// Record the planned vote and mark the proposal busy.
	pub fn record(&mut self, plan: &VotePlan) {
		self.votes.insert(plan.key.clone(), plan.next);
		self.in_flight.insert(plan.key.clone());
	}

	/// The server accepted the vote.
	pub fn settle(&mut self, key: &ProposalKey) {
		self.in_flight.remove(key);
	}

	/// The server refused the vote; go back to what was there before.
	pub fn restore(&mut self, plan: &VotePlan) {
		self.votes.insert(plan.key.clone(), plan.previous);
		self.in_flight.remove(&plan.key);
	}
}

/// Proposal lists together with this client's votes on them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoteBoard {
	pub proposals: GraphProposals,
	pub ledger: VoteLedger,
}

impl VoteBoard {
	/// Replace the proposal lists after a refetch, keeping the ledger.
	pub fn replace_proposals(&mut self, proposals: GraphProposals) {
		self.proposals = proposals;
	}
}

/// Optimistic tally and ledger update for one vote.
pub fn vote_mutation(plan: VotePlan) -> OptimisticMutation<VoteBoard> {
	let forward = plan.clone();
	OptimisticMutation::new(
		move |board: &mut VoteBoard| {
			board.ledger.record(&forward);
			board.proposals.adjust_votes(
				&forward.key,
				forward.upvote_delta(),
				forward.downvote_delta(),
			);
		},
		move |board: &mut VoteBoard| {
			board.ledger.restore(&plan);
			board
				.proposals
				.adjust_votes(&plan.key, -plan.upvote_delta(), -plan.downvote_delta());
		},
	)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{ElementKind, NodeProposal};

	fn key() -> ProposalKey {
		ProposalKey::new(ElementKind::Node, "p1")
	}

	fn board(upvotes: i64, downvotes: i64) -> VoteBoard {
		VoteBoard {
			proposals: GraphProposals {
				node_proposals: vec![NodeProposal {
					id: "p1".into(),
					upvotes,
					downvotes,
					..Default::default()
				}],
				edge_proposals: Vec::new(),
			},
			ledger: VoteLedger::default(),
		}
	}

	fn score(board: &VoteBoard) -> i64 {
		let (up, down) = board.proposals.tally(&key()).unwrap();
		up - down
	}

	#[test]
	fn first_click_casts_the_vote() {
		let ledger = VoteLedger::default();
		let plan = ledger.plan(&key(), VoteValue::Up).unwrap();
		assert_eq!(plan.previous, VoteValue::None);
		assert_eq!(plan.next, VoteValue::Up);
		assert_eq!((plan.upvote_delta(), plan.downvote_delta()), (1, 0));
	}

	#[test]
	fn same_vote_twice_toggles_off() {
		let mut b = board(3, 1);
		let first = b.ledger.plan(&key(), VoteValue::Up).unwrap();
		vote_mutation(first).apply(&mut b);
		b.ledger.settle(&key());
		let single_vote_score = score(&b);

		let second = b.ledger.plan(&key(), VoteValue::Up).unwrap();
		assert_eq!(second.next, VoteValue::None);
		vote_mutation(second).apply(&mut b);
		b.ledger.settle(&key());

		assert_eq!(b.ledger.current(&key()), VoteValue::None);
		assert_eq!(score(&b) - single_vote_score, -1);
		assert_eq!(b.proposals.tally(&key()), Some((3, 1)));
	}

	#[test]
	fn switching_sides_moves_both_counts() {
		let mut b = board(0, 0);
		let up = b.ledger.plan(&key(), VoteValue::Up).unwrap();
		vote_mutation(up).apply(&mut b);
		b.ledger.settle(&key());

		let down = b.ledger.plan(&key(), VoteValue::Down).unwrap();
		assert_eq!(down.score_delta(), -2);
		vote_mutation(down).apply(&mut b);
		assert_eq!(b.proposals.tally(&key()), Some((0, 1)));
	}

	#[test]
	fn in_flight_vote_blocks_another() {
		let mut b = board(0, 0);
		let plan = b.ledger.plan(&key(), VoteValue::Down).unwrap();
		vote_mutation(plan).apply(&mut b);
		assert!(b.ledger.is_in_flight(&key()));
		assert_eq!(
			b.ledger.plan(&key(), VoteValue::Up),
			Err(VoteError::InFlight)
		);
	}

	#[test]
	fn rollback_restores_tally_and_vote() {
		let mut b = board(5, 2);
		let before = b.clone();
		let plan = b.ledger.plan(&key(), VoteValue::Down).unwrap();
		let mutation = vote_mutation(plan);
		mutation.apply(&mut b);
		assert_eq!(b.proposals.tally(&key()), Some((5, 3)));

		mutation.rollback(&mut b);
		assert_eq!(b.proposals, before.proposals);
		assert_eq!(b.ledger.current(&key()), VoteValue::None);
		assert!(!b.ledger.is_in_flight(&key()));
	}

	#[test]
	fn messages_follow_the_new_value() {
		let ledger = VoteLedger::default();
		assert_eq!(
			ledger.plan(&key(), VoteValue::Down).unwrap().success_message(),
			"Downvoted!"
		);
	}
}
