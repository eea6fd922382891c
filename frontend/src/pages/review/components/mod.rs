pub mod claim_list;
pub mod policy_list;
pub mod tabs;

pub use claim_list::ClaimList;
pub use policy_list::PolicyList;
pub use tabs::ReviewTabs;
