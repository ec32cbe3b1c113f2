//! Model layer - centralized state management
//!
//! - Records: `Book`, `Member`, `Loan`, `Fine`, amounts as `Money`
//! - `DomainState` - catalog store, activity log and session
//! - `Session` / `Role` - logged-in user and role gating
//! - `ModalStack` / `FormState` - overlay and form state

pub mod activity;
pub mod book;
pub mod domain;
pub mod fine;
pub mod form;
pub mod loan;
pub mod member;
pub mod modal;
pub mod money;
pub mod session;
pub mod ui;
