// Linkshelf state managers
// Managers own persistent state; the link manager owns the link document.

pub mod link_manager;
