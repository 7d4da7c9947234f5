//! Parser for the `#Paraver` trace header line.
//!
//! The header is a compact, nested, parenthesized grammar describing the
//! capture date, total execution time, and the job topology (applications,
//! tasks, threads, nodes):
//!
//! ```text
//! #Paraver (DD/MM/YYYY at HH:MM):<exec_time>_ns:<node_spec>:<nappl>:<appl specs>
//! ```
//!
//! `<node_spec>` is either the literal `0` (no explicit node counts) or
//! `N(n1,...,nN)`. Each application spec is `task_count(threads:node,...)`,
//! one `threads:node` pair per task. Anything after the final application
//! group (such as an optional communicator count) is ignored.

use crate::utils::error::HeaderError;
use chrono::NaiveDateTime;
use log::debug;
use serde::Serialize;

/// Placement of one task: how many threads it runs and on which node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskPlacement {
    pub thread_count: u32,
    pub node_id: u32,
}

/// Structured metadata decoded from the header line
///
/// Read-only after construction; the record stream parser never needs it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceHeader {
    /// Total execution time in nanoseconds
    pub exec_time_ns: i64,
    /// Capture timestamp, minute precision
    pub date: NaiveDateTime,
    /// Per-application node counts, `None` when the node spec is `0`
    pub node_counts: Option<Vec<u32>>,
    /// One topology group per application, one entry per task
    pub applications: Vec<Vec<TaskPlacement>>,
}

/// Parse a `#Paraver` header line into structured metadata
///
/// **Public** - main entry point for header parsing
///
/// # Errors
/// `HeaderError` naming the grammar element that failed: a missing literal
/// token, a date outside `DD/MM/YYYY HH:MM`, a non-numeric count, or a
/// group whose element count does not match its declared count.
pub fn parse_header(line: &str) -> Result<TraceHeader, HeaderError> {
    let trimmed = line.trim_end();
    let mut scanner = Scanner::new(trimmed);

    scanner.expect("#Paraver (")?;
    let date = parse_date(scanner.take_until("):")?)?;
    let exec_time_ns = parse_number::<i64>("execution time", scanner.take_until("_ns")?)?;
    scanner.expect(":")?;

    let node_counts = parse_node_spec(scanner.take_until(":")?)?;

    let appl_count =
        parse_number::<usize>("application count", scanner.take_until(":")?)?;
    let applications = parse_applications(&mut scanner, appl_count)?;

    debug!(
        "Parsed header: {} ns, {} application(s)",
        exec_time_ns, appl_count
    );

    Ok(TraceHeader {
        exec_time_ns,
        date,
        node_counts,
        applications,
    })
}

/// Parse the `DD/MM/YYYY at HH:MM` timestamp
///
/// **Private** - internal helper
fn parse_date(value: &str) -> Result<NaiveDateTime, HeaderError> {
    NaiveDateTime::parse_from_str(value, "%d/%m/%Y at %H:%M").map_err(|_| {
        HeaderError::BadDate {
            value: value.to_string(),
        }
    })
}

/// Parse the node spec: `0` means absent, `N(n1,...,nN)` lists counts
///
/// **Private** - internal helper
fn parse_node_spec(spec: &str) -> Result<Option<Vec<u32>>, HeaderError> {
    if spec == "0" {
        return Ok(None);
    }

    let (count_str, rest) = spec.split_once('(').ok_or(HeaderError::MissingToken {
        token: "(",
        line: spec.to_string(),
    })?;
    let list = rest.strip_suffix(')').ok_or(HeaderError::MissingToken {
        token: ")",
        line: spec.to_string(),
    })?;

    let declared = parse_number::<usize>("node count", count_str)?;
    let counts = list
        .split(',')
        .map(|n| parse_number::<u32>("node count", n))
        .collect::<Result<Vec<_>, _>>()?;

    if counts.len() != declared {
        return Err(HeaderError::CountMismatch {
            element: "node counts",
            declared,
            found: counts.len(),
        });
    }
    Ok(Some(counts))
}

/// Parse `appl_count` application groups, `task_count(threads:node,...)` each
///
/// Groups are `:`-separated, but colons also occur inside the parenthesized
/// pair lists, so the groups are consumed positionally rather than split.
///
/// **Private** - internal helper
fn parse_applications(
    scanner: &mut Scanner<'_>,
    appl_count: usize,
) -> Result<Vec<Vec<TaskPlacement>>, HeaderError> {
    let mut applications = Vec::with_capacity(appl_count);

    for index in 0..appl_count {
        let task_count = parse_number::<usize>("task count", scanner.take_until("(")?)?;
        let group = scanner.take_until(")")?;

        let tasks = group
            .split(',')
            .map(parse_task_placement)
            .collect::<Result<Vec<_>, _>>()?;

        if tasks.len() != task_count {
            return Err(HeaderError::CountMismatch {
                element: "tasks",
                declared: task_count,
                found: tasks.len(),
            });
        }
        applications.push(tasks);

        // Groups are separated by ':'; trailing content after the last
        // group (e.g. a communicator count) is tolerated and ignored.
        if index + 1 < appl_count {
            scanner.expect(":")?;
        }
    }

    Ok(applications)
}

/// Parse one `threads:node` pair
///
/// **Private** - internal helper
fn parse_task_placement(pair: &str) -> Result<TaskPlacement, HeaderError> {
    let (threads, node) = pair.split_once(':').ok_or(HeaderError::MissingToken {
        token: ":",
        line: pair.to_string(),
    })?;
    Ok(TaskPlacement {
        thread_count: parse_number("thread count", threads)?,
        node_id: parse_number("node id", node)?,
    })
}

/// Parse an integer, naming the grammar element on failure
///
/// **Private** - internal utility
fn parse_number<T: std::str::FromStr>(
    element: &'static str,
    value: &str,
) -> Result<T, HeaderError> {
    value.parse::<T>().map_err(|_| HeaderError::BadNumber {
        element,
        value: value.to_string(),
    })
}

/// Minimal left-to-right scanner over the header line
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Consume an exact literal token
    fn expect(&mut self, token: &'static str) -> Result<(), HeaderError> {
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(HeaderError::MissingToken {
                token,
                line: self.rest.to_string(),
            }),
        }
    }

    /// Consume and return everything before the next occurrence of `token`,
    /// consuming the token itself as well
    fn take_until(&mut self, token: &'static str) -> Result<&'a str, HeaderError> {
        match self.rest.find(token) {
            Some(pos) => {
                let taken = &self.rest[..pos];
                self.rest = &self.rest[pos + token.len()..];
                Ok(taken)
            }
            None => Err(HeaderError::MissingToken {
                token,
                line: self.rest.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_header() {
        let header = parse_header("#Paraver (10/04/2001 at 18:21):620244_ns:0:1:1(4:0)").unwrap();
        assert_eq!(header.exec_time_ns, 620244);
        assert_eq!(header.node_counts, None);
        assert_eq!(
            header.applications,
            vec![vec![TaskPlacement {
                thread_count: 4,
                node_id: 0
            }]]
        );
    }

    #[test]
    fn test_missing_paraver_magic() {
        let err = parse_header("Paraver (10/04/2001 at 18:21):620244_ns:0:1:1(4:0)").unwrap_err();
        assert!(matches!(
            err,
            HeaderError::MissingToken {
                token: "#Paraver (",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_date() {
        let err = parse_header("#Paraver (2001-04-10 at 18:21):620244_ns:0:1:1(4:0)").unwrap_err();
        assert!(matches!(err, HeaderError::BadDate { .. }));
    }

    #[test]
    fn test_node_count_mismatch() {
        let err = parse_header("#Paraver (10/04/2001 at 18:21):620244_ns:2(4):1:1(4:0)").unwrap_err();
        assert_eq!(
            err,
            HeaderError::CountMismatch {
                element: "node counts",
                declared: 2,
                found: 1
            }
        );
    }
}
