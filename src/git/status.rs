// Parsing of git porcelain output

/// Two-letter porcelain codes of unmerged paths that stop the merge chain.
const CONFLICT_CODES: [&str; 3] = ["UU", "AA", "DD"];

/// Paths whose `git status --porcelain` entry carries a conflict marker.
pub fn conflicted_paths(porcelain: &str) -> Vec<String> {
    porcelain
        .lines()
        .filter_map(|line| {
            let code = line.get(..2)?;
            let path = line.get(2..)?.trim();
            (CONFLICT_CODES.contains(&code) && !path.is_empty()).then(|| path.to_string())
        })
        .collect()
}

/// Turn `git branch -a` output into unique branch names.
///
/// The current-branch marker and the `remotes/<remote>/` prefix are stripped,
/// symbolic `HEAD` entries are dropped, first occurrence wins.
pub fn parse_branch_list(output: &str, remote: &str) -> Vec<String> {
    let remote_prefix = format!("remotes/{}/", remote);
    let mut branches: Vec<String> = Vec::new();

    for line in output.lines() {
        let name = line.trim_start_matches('*').trim();
        let name = name.strip_prefix(&remote_prefix).unwrap_or(name);
        if name.is_empty() || name.contains("HEAD") {
            continue;
        }
        if !branches.iter().any(|branch| branch == name) {
            branches.push(name.to_string());
        }
    }

    branches
}
