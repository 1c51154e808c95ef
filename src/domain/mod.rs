mod waitlist_email;
// allow external `use` statements to skip `waitlist_email`
pub use waitlist_email::WaitlistEmail;
