use vacancy_core::{PagedVacancyList, SourcedText, VacancySummary};

fn vacancy(id: &str) -> VacancySummary {
    VacancySummary {
        id: id.to_string(),
        title: format!("Vacancy {id}"),
        image_url: None,
        city: "Moscow".to_string(),
        salary_from: "100000".to_string(),
        salary_to: "200000".to_string(),
        currency: "RUR".to_string(),
        employer_name: "Acme".to_string(),
        experience_level: "1-3 years".to_string(),
        employment_type: "Full time".to_string(),
        schedule: "Remote".to_string(),
        responsibility_snippet: "Write code".to_string(),
        requirement_snippet: "Rust".to_string(),
        conditions: SourcedText::NotYetSourced,
        skills: SourcedText::NotYetSourced,
    }
}

fn page(ids: &[&str]) -> Vec<VacancySummary> {
    ids.iter().map(|id| vacancy(id)).collect()
}

#[test]
fn appended_pages_concatenate() {
    let mut list = PagedVacancyList::new();
    let mut rendered = Vec::new();

    let first = list.append(page(&["1", "2", "3"]));
    first.apply_to(&mut rendered);
    let second = list.append(page(&["4", "5"]));
    second.apply_to(&mut rendered);

    let expected = page(&["1", "2", "3", "4", "5"]);
    assert_eq!(list.items(), expected.as_slice());
    assert_eq!(rendered, expected);
    assert_eq!(second.counts().inserted, 2);
    assert_eq!(second.len(), 2);
}

#[test]
fn overlapping_pages_are_not_deduplicated() {
    let mut list = PagedVacancyList::new();
    list.append(page(&["1", "2"]));
    let changes = list.append(page(&["2", "3"]));

    assert_eq!(list.len(), 4);
    assert_eq!(changes.counts().inserted, 2);
}

#[test]
fn clear_removes_exactly_the_previous_contents() {
    let mut list = PagedVacancyList::new();
    list.append(page(&["1", "2", "3"]));
    let mut rendered = list.items().to_vec();

    let changes = list.clear();
    changes.apply_to(&mut rendered);

    assert!(list.is_empty());
    assert!(rendered.is_empty());
    assert_eq!(changes.counts().removed, 3);
    assert_eq!(changes.len(), 3);
}

#[test]
fn clearing_an_empty_list_is_a_no_op() {
    let mut list = PagedVacancyList::new();
    assert!(list.clear().is_empty());
}

#[test]
fn replace_reconciles_arbitrary_snapshots() {
    let mut list = PagedVacancyList::new();
    list.append(page(&["1", "2", "3"]));
    let mut rendered = list.items().to_vec();

    let changes = list.replace(page(&["3", "4", "1"]));
    changes.apply_to(&mut rendered);

    assert_eq!(rendered, page(&["3", "4", "1"]));
}
