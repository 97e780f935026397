//! UI components.

pub mod contribution_queue;
pub mod dashboard;
pub mod force_graph;
pub mod info_panel;
pub mod knowledge_graph;
pub mod notice;
pub mod proposal_editor;
pub mod query_bar;
pub mod search_panel;

pub use contribution_queue::ContributionQueue;
pub use dashboard::CommunityDashboard;
pub use knowledge_graph::KnowledgeGraph;
pub use notice::{NoticeStack, Notices, use_notices};
pub use proposal_editor::ProposalEditor;
pub use query_bar::QueryBar;
pub use search_panel::SearchPanel;
