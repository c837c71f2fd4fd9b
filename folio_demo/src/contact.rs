use std::sync::LazyLock;

use folio_models::contact::ContactSubmission;

pub static JANE: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Jane Doe".try_into().unwrap(),
    email: "jane@example.com".parse().unwrap(),
    project: "Need a 5-page site".try_into().unwrap(),
});

pub static MAX: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Max Mustermann".try_into().unwrap(),
    email: "max.mustermann@example.de".parse().unwrap(),
    project: "Landing page with pricing table\n\nBudget: flexible, launch in Q3."
        .try_into()
        .unwrap(),
});
