use crate::config::BenchConfig;
use crate::domain::model::{Domain, DomainCorpus, ProblemInstance};
use crate::utils::error::{BenchError, Result};
use std::path::PathBuf;

/// Resolves a domain directory into its description file and a sorted,
/// size-bounded sample of problem files.
#[derive(Debug, Clone)]
pub struct ProblemLocator {
    benchmarks_dir: PathBuf,
    domain_file: String,
    problem_prefix: String,
    problem_extension: String,
    sample_size: usize,
}

impl ProblemLocator {
    pub fn from_config(config: &BenchConfig) -> Self {
        Self {
            benchmarks_dir: config.benchmarks_dir.clone(),
            domain_file: config.domain_file.clone(),
            problem_prefix: config.problem_prefix.clone(),
            problem_extension: config.problem_extension.clone(),
            sample_size: config.sample_size,
        }
    }

    pub fn is_problem_file(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.problem_prefix) && file_name.ends_with(&self.problem_extension)
    }

    pub fn locate(&self, domain: &str) -> Result<DomainCorpus> {
        let domain_dir = self.benchmarks_dir.join(domain);
        if !domain_dir.is_dir() {
            return Err(BenchError::DomainNotFound {
                domain: domain.to_string(),
                path: domain_dir.display().to_string(),
            });
        }

        let description_file = domain_dir.join(&self.domain_file);
        if !description_file.is_file() {
            return Err(BenchError::DomainFileMissing {
                domain: domain.to_string(),
                path: description_file.display().to_string(),
            });
        }

        let mut names = Vec::new();
        let corpus_read_error = |source: std::io::Error| BenchError::CorpusReadError {
            domain: domain.to_string(),
            path: domain_dir.display().to_string(),
            source,
        };
        for entry in std::fs::read_dir(&domain_dir).map_err(corpus_read_error)? {
            let entry = entry.map_err(corpus_read_error)?;
            if !entry.path().is_file() {
                continue;
            }
            // 非 UTF-8 檔名不可能符合命名規則
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if self.is_problem_file(&name) {
                names.push(name);
            }
        }

        // read_dir 的順序不固定，排序後才能保證每次選到同一批題目
        names.sort();
        let eligible = names.len();
        names.truncate(self.sample_size);

        tracing::debug!(
            "Domain {}: {} eligible problem files, selected {}",
            domain,
            eligible,
            names.len()
        );

        let problems = names
            .into_iter()
            .map(|name| ProblemInstance {
                domain: domain.to_string(),
                path: domain_dir.join(name),
            })
            .collect();

        Ok(DomainCorpus {
            domain: Domain {
                name: domain.to_string(),
                description_file,
            },
            problems,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn locator(root: &TempDir, sample_size: usize) -> ProblemLocator {
        let config = BenchConfig {
            benchmarks_dir: root.path().to_path_buf(),
            sample_size,
            ..BenchConfig::default()
        };
        ProblemLocator::from_config(&config)
    }

    fn make_domain(root: &TempDir, domain: &str, files: &[&str]) {
        let dir = root.path().join(domain);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("domain.pddl"), "(define (domain x))").unwrap();
        for file in files {
            fs::write(dir.join(file), "(define (problem x))").unwrap();
        }
    }

    #[test]
    fn test_gripper_excludes_non_matching_files() {
        let root = TempDir::new().unwrap();
        make_domain(
            &root,
            "gripper",
            &["p03.pddl", "p01.pddl", "readme.pddl", "p05.pddl", "p02.pddl", "p04.pddl"],
        );

        let corpus = locator(&root, 5).locate("gripper").unwrap();
        let names: Vec<String> = corpus.problems.iter().map(|p| p.file_name()).collect();

        assert_eq!(
            names,
            vec!["p01.pddl", "p02.pddl", "p03.pddl", "p04.pddl", "p05.pddl"]
        );
        assert_eq!(
            corpus.domain.description_file,
            root.path().join("gripper").join("domain.pddl")
        );
        assert!(corpus.problems.iter().all(|p| p.domain == "gripper"));
    }

    #[test]
    fn test_truncates_to_sample_size_after_sorting() {
        let root = TempDir::new().unwrap();
        make_domain(
            &root,
            "depots",
            &["p10.pddl", "p02.pddl", "p07.pddl", "p01.pddl", "notes.txt", "p03.txt"],
        );

        let corpus = locator(&root, 2).locate("depots").unwrap();
        let names: Vec<String> = corpus.problems.iter().map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["p01.pddl", "p02.pddl"]);
    }

    #[test]
    fn test_skips_directories_with_matching_names() {
        let root = TempDir::new().unwrap();
        make_domain(&root, "logistics", &["p01.pddl"]);
        fs::create_dir(root.path().join("logistics").join("p00.pddl")).unwrap();

        let corpus = locator(&root, 5).locate("logistics").unwrap();
        assert_eq!(corpus.problems.len(), 1);
    }

    #[test]
    fn test_domain_without_problems_is_empty_not_error() {
        let root = TempDir::new().unwrap();
        make_domain(&root, "blocksworld", &[]);

        let corpus = locator(&root, 5).locate("blocksworld").unwrap();
        assert!(corpus.problems.is_empty());
    }

    #[test]
    fn test_missing_domain_directory_is_fatal() {
        let root = TempDir::new().unwrap();
        let err = locator(&root, 5).locate("gripper").unwrap_err();
        assert!(matches!(err, BenchError::DomainNotFound { .. }));
    }

    #[test]
    fn test_missing_domain_file_is_fatal() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("gripper");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("p01.pddl"), "").unwrap();

        let err = locator(&root, 5).locate("gripper").unwrap_err();
        assert!(matches!(err, BenchError::DomainFileMissing { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_domain_directory_is_corpus_error() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        make_domain(&root, "depots", &["p01.pddl"]);
        let dir = root.path().join("depots");
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o300)).unwrap();

        // root 不受權限限制，無法重現
        if fs::read_dir(&dir).is_ok() {
            fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = locator(&root, 5).locate("depots");
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(
            &err,
            BenchError::CorpusReadError { domain, .. } if domain == "depots"
        ));
        assert!(err.is_configuration_error());
    }
}
