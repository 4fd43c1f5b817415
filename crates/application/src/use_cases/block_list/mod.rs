mod add_blocked_domain;
mod add_current_page;
mod get_blocked_domains;
mod remove_blocked_domain;
mod toggle_blocked_domain;

pub use add_blocked_domain::AddBlockedDomainUseCase;
pub use add_current_page::AddCurrentPageUseCase;
pub use get_blocked_domains::GetBlockedDomainsUseCase;
pub use remove_blocked_domain::RemoveBlockedDomainUseCase;
pub use toggle_blocked_domain::ToggleBlockedDomainUseCase;
