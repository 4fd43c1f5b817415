mod navigation_guard;

pub use navigation_guard::{GuardDecision, NavigationGuardUseCase};
