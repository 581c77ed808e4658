use crate::cursor::TimeCursor;
use crate::explorer::ExplorerState;
use crate::model::{Commit, Step};

/// One narration step per commit, in chronological order. Each step carries
/// the cursor position that reveals its commit.
pub fn steps(commits: &[Commit], cursor: &TimeCursor) -> Vec<Step> {
    let mut ordered: Vec<&Commit> = commits.iter().collect();
    ordered.sort_by_key(|c| c.datetime);

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, commit)| Step {
            index,
            commit_id: commit.id.clone(),
            progress: cursor.progress_of(&commit.datetime).unwrap_or(100.0),
            text: narrate(index, commit),
        })
        .collect()
}

fn narrate(index: usize, commit: &Commit) -> String {
    let when = commit.datetime.format("%A, %B %-d, %Y at %-I:%M %p");
    let what = if index == 0 {
        "my first commit, and it was glorious"
    } else {
        "another glorious commit"
    };
    let files = commit.file_count();
    format!(
        "On {when}, I made {what}. I edited {} lines across {} {}. \
         Then I looked over all I had made, and I saw that it was very good.",
        commit.total_lines,
        files,
        if files == 1 { "file" } else { "files" },
    )
}

/// Scrolling a step into view moves the cursor to that step's commit.
pub fn step_entered(state: ExplorerState, step: &Step) -> ExplorerState {
    state.with_progress(step.progress)
}
