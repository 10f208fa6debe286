use crate::domain::model::SolverKind;
use crate::utils::error::{BenchError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_DOMAINS: [&str; 4] = ["blocksworld", "depots", "gripper", "logistics"];
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// Everything one benchmark pass needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default = "default_benchmarks_dir")]
    pub benchmarks_dir: PathBuf,
    #[serde(default = "default_domains")]
    pub domains: Vec<String>,
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    #[serde(default = "default_domain_file")]
    pub domain_file: String,
    #[serde(default = "default_problem_prefix")]
    pub problem_prefix: String,
    #[serde(default = "default_problem_extension")]
    pub problem_extension: String,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default)]
    pub solvers: HashMap<String, SolverSpec>,
}

/// How to launch one solver.
///
/// `{domain}` and `{problem}` in `args` are replaced by the instance paths.
/// Without any placeholder the two paths are appended as positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

pub const DOMAIN_PLACEHOLDER: &str = "{domain}";
pub const PROBLEM_PLACEHOLDER: &str = "{problem}";

impl SolverSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn has_placeholders(&self) -> bool {
        self.args
            .iter()
            .any(|arg| arg.contains(DOMAIN_PLACEHOLDER) || arg.contains(PROBLEM_PLACEHOLDER))
    }

    /// 組出實際的命令列參數
    pub fn render_args(&self, domain_file: &Path, problem_file: &Path) -> Vec<String> {
        let domain = domain_file.to_string_lossy();
        let problem = problem_file.to_string_lossy();

        if self.has_placeholders() {
            self.args
                .iter()
                .map(|arg| {
                    arg.replace(DOMAIN_PLACEHOLDER, &domain)
                        .replace(PROBLEM_PLACEHOLDER, &problem)
                })
                .collect()
        } else {
            let mut args = self.args.clone();
            args.push(domain.into_owned());
            args.push(problem.into_owned());
            args
        }
    }
}

fn default_benchmarks_dir() -> PathBuf {
    PathBuf::from("benchmarks")
}

fn default_domains() -> Vec<String> {
    DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect()
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_domain_file() -> String {
    "domain.pddl".to_string()
}

fn default_problem_prefix() -> String {
    "p".to_string()
}

fn default_problem_extension() -> String {
    ".pddl".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("comparison_results.csv")
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            benchmarks_dir: default_benchmarks_dir(),
            domains: default_domains(),
            sample_size: default_sample_size(),
            domain_file: default_domain_file(),
            problem_prefix: default_problem_prefix(),
            problem_extension: default_problem_extension(),
            output_path: default_output_path(),
            solvers: HashMap::new(),
        }
    }
}

impl BenchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BenchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| BenchError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        config.substitute_env_vars()?;
        Ok(config)
    }

    /// 解析後再替換環境變數 (例如 ${MAVEN_HOME})，值裡的反斜線不會被當成 TOML 跳脫字元
    fn substitute_env_vars(&mut self) -> Result<()> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| BenchError::config(format!("Invalid substitution pattern: {}", e)))?;

        let expand = |value: &str| -> String {
            re.replace_all(value, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
        };
        let expand_path = |path: &Path| PathBuf::from(expand(&path.to_string_lossy()));

        self.benchmarks_dir = expand_path(&self.benchmarks_dir);
        self.output_path = expand_path(&self.output_path);
        for domain in &mut self.domains {
            *domain = expand(domain);
        }
        for spec in self.solvers.values_mut() {
            spec.program = expand(&spec.program);
            for arg in &mut spec.args {
                *arg = expand(arg);
            }
            if let Some(dir) = &spec.working_dir {
                spec.working_dir = Some(expand_path(dir));
            }
        }

        Ok(())
    }

    pub fn with_solver(mut self, solver: SolverKind, spec: SolverSpec) -> Self {
        self.solvers.insert(solver.name().to_string(), spec);
        self
    }

    pub fn solver(&self, solver: SolverKind) -> Option<&SolverSpec> {
        self.solvers.get(solver.name())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path(
            "benchmarks_dir",
            &self.benchmarks_dir.to_string_lossy(),
        )?;
        validation::validate_path("output_path", &self.output_path.to_string_lossy())?;

        validation::validate_non_empty_list("domains", &self.domains)?;
        for domain in &self.domains {
            validation::validate_path_segment("domains", domain)?;
        }
        validation::validate_unique("domains", &self.domains)?;

        validation::validate_positive_number("sample_size", self.sample_size, 1)?;
        validation::validate_path_segment("domain_file", &self.domain_file)?;
        validation::validate_non_empty_string("problem_extension", &self.problem_extension)?;

        for name in self.solvers.keys() {
            if SolverKind::from_name(name).is_none() {
                return Err(BenchError::InvalidConfigValueError {
                    field: "solvers".to_string(),
                    value: name.clone(),
                    reason: "Unknown solver. Valid solvers: SAT, HSP".to_string(),
                });
            }
        }

        for solver in SolverKind::ALL {
            let spec = self.solver(solver).ok_or_else(|| BenchError::MissingConfigError {
                field: format!("solvers.{}", solver.name()),
            })?;
            validation::validate_non_empty_string(
                &format!("solvers.{}.program", solver.name()),
                &spec.program,
            )?;
        }

        Ok(())
    }
}

impl Validate for BenchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
