use crate::model::record::Record;

/// Error type for working-set edits
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("project name cannot be empty")]
    EmptyName,
    #[error("no project at position {}", .0 + 1)]
    NoSuchProject(usize),
    #[error("breakdown produced no subtasks")]
    EmptyBreakdown,
}

/// Append a new, not-completed project. Returns its index.
pub fn add_project(records: &mut Vec<Record>, name: &str) -> Result<usize, ActionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ActionError::EmptyName);
    }
    records.push(Record::new(name));
    Ok(records.len() - 1)
}

/// Flip the completed flag. Returns the new value.
pub fn toggle_project(records: &mut [Record], index: usize) -> Result<bool, ActionError> {
    let record = records
        .get_mut(index)
        .ok_or(ActionError::NoSuchProject(index))?;
    record.completed = !record.completed;
    Ok(record.completed)
}

pub fn delete_project(records: &mut Vec<Record>, index: usize) -> Result<Record, ActionError> {
    if index >= records.len() {
        return Err(ActionError::NoSuchProject(index));
    }
    Ok(records.remove(index))
}

/// Replace the project at `index` with one new project per part, in place.
///
/// Blank parts are skipped. If nothing usable remains the working set is
/// left untouched.
pub fn break_down_project(
    records: &mut Vec<Record>,
    index: usize,
    parts: &[String],
) -> Result<Record, ActionError> {
    if index >= records.len() {
        return Err(ActionError::NoSuchProject(index));
    }
    let subtasks: Vec<Record> = parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(Record::new)
        .collect();
    if subtasks.is_empty() {
        return Err(ActionError::EmptyBreakdown);
    }
    let original = records.remove(index);
    records.splice(index..index, subtasks);
    Ok(original)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(Record::label).collect()
    }

    #[test]
    fn add_trims_and_appends() {
        let mut records = vec![Record::new("A")];
        let idx = add_project(&mut records, "  Write report  ").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(names(&records), vec!["A", "Write report"]);
        assert!(!records[1].completed);
    }

    #[test]
    fn add_rejects_blank_name() {
        let mut records = Vec::new();
        assert_eq!(add_project(&mut records, "   "), Err(ActionError::EmptyName));
        assert!(records.is_empty());
    }

    #[test]
    fn toggle_flips_in_place() {
        let mut records = vec![Record::new("A")];
        assert_eq!(toggle_project(&mut records, 0), Ok(true));
        assert_eq!(toggle_project(&mut records, 0), Ok(false));
        assert_eq!(toggle_project(&mut records, 3), Err(ActionError::NoSuchProject(3)));
    }

    #[test]
    fn delete_removes_record() {
        let mut records = vec![Record::new("A"), Record::new("B")];
        let removed = delete_project(&mut records, 0).unwrap();
        assert_eq!(removed.label(), "A");
        assert_eq!(names(&records), vec!["B"]);
        assert!(delete_project(&mut records, 1).is_err());
    }

    #[test]
    fn break_down_replaces_original_in_place() {
        let mut records = vec![Record::new("A"), Record::new("Launch"), Record::new("Z")];
        let parts = vec!["Plan".to_string(), " ".to_string(), "Build".to_string()];
        let original = break_down_project(&mut records, 1, &parts).unwrap();
        assert_eq!(original.label(), "Launch");
        assert_eq!(names(&records), vec!["A", "Plan", "Build", "Z"]);
    }

    #[test]
    fn empty_break_down_leaves_working_set_alone() {
        let mut records = vec![Record::new("Launch")];
        let parts = vec!["".to_string(), "  ".to_string()];
        assert_eq!(
            break_down_project(&mut records, 0, &parts),
            Err(ActionError::EmptyBreakdown)
        );
        assert_eq!(names(&records), vec!["Launch"]);
    }
}
