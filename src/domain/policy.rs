/// Resource address under which the policy text is published.
pub const LEAVE_POLICY_URI: &str = "leave-policy://company";

const LEAVE_POLICY: &str = "\
Company Leave Policy:
1. Annual leave: 20 days per year.
2. Sick leave: 10 days per year.
3. All leave requests must be approved by the manager.
4. Leave cancellation allowed up to 1 day before start date.
";

/// The company leave policy.
pub fn leave_policy() -> &'static str {
    LEAVE_POLICY
}

/// Build the message sent to an employee once a manager has decided on
/// their leave. The reason is only shown on rejection.
pub fn approval_message(name: &str, approved: bool, reason: &str) -> String {
    if approved {
        format!(
            "Dear {},\n\nYour leave request has been approved.\nEnjoy your time off!",
            name
        )
    } else {
        format!(
            "Dear {},\n\nUnfortunately, your leave request has been rejected.\nReason: {}",
            name, reason
        )
    }
}
