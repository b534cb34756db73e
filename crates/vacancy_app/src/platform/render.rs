use vacancy_core::{
    ChangeCounts, ChangeSet, Industry, IndustryRender, IndustryViewModel, Notification, SearchRender,
    SearchViewModel, VacancySummary,
};

/// Rendering-side copy of a list, kept in sync by replaying change sets only.
#[derive(Debug)]
pub struct ListMirror<T> {
    items: Vec<T>,
}

impl<T> Default for ListMirror<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Clone> ListMirror<T> {
    pub fn apply(&mut self, change_sets: Vec<ChangeSet<T>>) -> ChangeCounts {
        let mut total = ChangeCounts::default();
        for changes in change_sets {
            changes.apply_to(&mut self.items);
            let counts = changes.counts();
            total.removed += counts.removed;
            total.moved += counts.moved;
            total.inserted += counts.inserted;
            total.changed += counts.changed;
        }
        total
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

pub fn render_search(view: &SearchViewModel, rows: &[VacancySummary]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut header = format!("Search: \"{}\"", view.query);
    if let Some(industry) = &view.industry {
        header.push_str(&format!("  [industry: {}]", industry.name));
    }
    lines.push(header);

    match &view.render {
        SearchRender::Loading => lines.push("Loading...".to_string()),
        SearchRender::Empty if view.query.is_empty() => {
            lines.push("Type to search vacancies (:help for commands)".to_string())
        }
        SearchRender::Empty => lines.push("No vacancies found".to_string()),
        SearchRender::Error => {
            lines.push("Could not load vacancies. :retry to try again".to_string())
        }
        SearchRender::NoConnectivity => {
            lines.push("No internet connection. :retry to try again".to_string())
        }
        SearchRender::Content { found, .. } => {
            lines.push(format!("Found {found} vacancies"));
            for (index, vacancy) in rows.iter().enumerate() {
                lines.push(vacancy_row(index + 1, vacancy));
            }
            if view.loading_more {
                lines.push("Loading more...".to_string());
            } else if view.can_load_more {
                lines.push(":more for the next page".to_string());
            }
        }
    }
    lines
}

fn vacancy_row(position: usize, vacancy: &VacancySummary) -> String {
    format!(
        "{position:>3}. [{}] {} | {} | {} | {} - {} {}",
        vacancy.id,
        vacancy.title,
        vacancy.employer_name,
        vacancy.city,
        vacancy.salary_from,
        vacancy.salary_to,
        vacancy.currency
    )
}

/// Rows come from the mirror; the view model supplies the state and the selection.
pub fn render_industries(view: &IndustryViewModel, rows: &[Industry]) -> Vec<String> {
    let mut lines = vec![format!("Industry filter: \"{}\"", view.filter)];
    match &view.render {
        IndustryRender::Loading => lines.push("Loading...".to_string()),
        IndustryRender::Empty => lines.push("No such industry".to_string()),
        IndustryRender::Error => {
            lines.push("Could not load industries. :retry to try again".to_string())
        }
        IndustryRender::NoConnectivity => {
            lines.push("No internet connection. :retry to try again".to_string())
        }
        IndustryRender::Content(view_rows) => {
            let selected = view_rows
                .iter()
                .find(|row| row.selected)
                .map(|row| row.industry.id.as_str());
            for industry in rows {
                let mark = if selected == Some(industry.id.as_str()) { "x" } else { " " };
                lines.push(format!("[{mark}] {} ({})", industry.name, industry.id));
            }
        }
    }
    if view.apply_visible {
        lines.push(":apply to use the selected industry".to_string());
    }
    lines
}

pub fn notification_text(notification: Notification) -> &'static str {
    match notification {
        Notification::ErrorOccurred => "An error occurred",
        Notification::NoConnectivity => "No internet connection",
    }
}

#[cfg(test)]
mod tests {
    use vacancy_core::{diff, IndustryRow, Keyed, SourcedText};

    use super::*;

    fn vacancy(id: &str) -> VacancySummary {
        VacancySummary {
            id: id.to_string(),
            title: "Rust developer".to_string(),
            image_url: None,
            city: "Remote".to_string(),
            salary_from: "100".to_string(),
            salary_to: "200".to_string(),
            currency: "EUR".to_string(),
            employer_name: "Acme".to_string(),
            experience_level: "-".to_string(),
            employment_type: "-".to_string(),
            schedule: "-".to_string(),
            responsibility_snippet: "-".to_string(),
            requirement_snippet: "-".to_string(),
            conditions: SourcedText::NotYetSourced,
            skills: SourcedText::NotYetSourced,
        }
    }

    #[test]
    fn mirror_follows_replayed_changes() {
        let mut mirror = ListMirror::default();
        let empty: Vec<VacancySummary> = Vec::new();
        let first = vec![vacancy("1"), vacancy("2")];
        let counts = mirror.apply(vec![diff(&empty, &first)]);
        assert_eq!(counts.inserted, 2);

        let second = vec![vacancy("2")];
        let counts = mirror.apply(vec![diff(&first, &second)]);
        assert_eq!(counts.removed, 1);
        let ids: Vec<&str> = mirror.items().iter().map(|v| v.key()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn content_lists_rows_and_paging_hint() {
        let view = SearchViewModel {
            query: "rust".to_string(),
            industry: None,
            render: SearchRender::Content {
                items: vec![vacancy("7")],
                found: 1,
            },
            loading_more: false,
            can_load_more: true,
        };
        let lines = render_search(&view, &[vacancy("7")]);
        assert_eq!(lines[1], "Found 1 vacancies");
        assert_eq!(lines[2], "  1. [7] Rust developer | Acme | Remote | 100 - 200 EUR");
        assert_eq!(lines[3], ":more for the next page");
    }

    #[test]
    fn idle_and_empty_results_read_differently() {
        let mut view = SearchViewModel {
            query: String::new(),
            industry: None,
            render: SearchRender::Empty,
            loading_more: false,
            can_load_more: false,
        };
        assert!(render_search(&view, &[])[1].starts_with("Type to search"));
        view.query = "cobol".to_string();
        assert_eq!(render_search(&view, &[])[1], "No vacancies found");
    }

    #[test]
    fn selected_industry_is_marked() {
        let software = Industry {
            id: "7.540".to_string(),
            name: "Software development".to_string(),
        };
        let telecom = Industry {
            id: "9.399".to_string(),
            name: "Telecom".to_string(),
        };
        let view = IndustryViewModel {
            filter: String::new(),
            render: IndustryRender::Content(vec![
                IndustryRow {
                    industry: software.clone(),
                    selected: true,
                },
                IndustryRow {
                    industry: telecom.clone(),
                    selected: false,
                },
            ]),
            apply_visible: true,
        };
        let lines = render_industries(&view, &[software, telecom]);
        assert_eq!(lines[1], "[x] Software development (7.540)");
        assert_eq!(lines[2], "[ ] Telecom (9.399)");
        assert_eq!(lines[3], ":apply to use the selected industry");
    }

    #[test]
    fn industry_mirror_follows_filter_changes() {
        let industry = |id: &str, name: &str| Industry {
            id: id.to_string(),
            name: name.to_string(),
        };
        let all = vec![industry("1", "Banking"), industry("2", "Retail"), industry("3", "Biotech")];
        let narrowed = vec![industry("1", "Banking"), industry("3", "Biotech")];
        let empty: Vec<Industry> = Vec::new();

        let mut mirror = ListMirror::default();
        mirror.apply(vec![diff(&empty, &all), diff(&all, &narrowed)]);
        assert_eq!(mirror.items(), narrowed.as_slice());
    }
}
