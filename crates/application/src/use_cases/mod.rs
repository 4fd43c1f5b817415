pub mod block_list;
pub mod navigation;

pub use block_list::{
    AddBlockedDomainUseCase, AddCurrentPageUseCase, GetBlockedDomainsUseCase,
    RemoveBlockedDomainUseCase, ToggleBlockedDomainUseCase,
};
pub use navigation::{GuardDecision, NavigationGuardUseCase};
