//! The split pipeline: one backup in, one JSON file per retained entity out.
//!
//! Categories land in `<data_dir>/categories/<index>.json` and other channels
//! in `<data_dir>/other_channels/<index>.json`, where `<index>` is the
//! entity's position in the source array. Skipped entities leave gaps in the
//! numbering rather than shifting later indices.

use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::{load_backup, Backup, Category};
use crate::error::Result;

const CATEGORIES_DIR: &str = "categories";
const OTHER_CHANNELS_DIR: &str = "other_channels";

/// Options controlling a split run
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Drop entities not visible to the default role
    pub filter_public: bool,
    /// Also split the `channels.others` array
    pub include_others: bool,
    /// Clear output subdirectories before writing, so index files from a
    /// previous larger run do not linger
    pub clean_output: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            filter_public: true,
            include_others: false,
            clean_output: true,
        }
    }
}

/// Outcome of one section (categories or other channels)
#[derive(Debug, Default)]
pub struct SectionReport {
    /// Files written, in index order
    pub written: Vec<PathBuf>,
    /// Entities omitted by the visibility filter
    pub skipped: usize,
}

/// Outcome of a whole split run
#[derive(Debug)]
pub struct SplitReport {
    /// The backup file that was read
    pub backup_file: PathBuf,
    pub categories: SectionReport,
    /// Present only when the other-channels pass is enabled
    pub others: Option<SectionReport>,
}

/// Splits one backup directory per the given options
pub struct Splitter {
    data_dir: PathBuf,
    options: SplitOptions,
}

impl Splitter {
    pub fn new(data_dir: impl Into<PathBuf>, options: SplitOptions) -> Self {
        Self {
            data_dir: data_dir.into(),
            options,
        }
    }

    /// Load the backup and write out every retained entity.
    ///
    /// Any error aborts the run immediately; files already written stay on
    /// disk.
    pub fn run(&self) -> Result<SplitReport> {
        let (backup_file, backup) = load_backup(&self.data_dir)?;

        let categories = self.split_categories(&backup)?;
        let others = if self.options.include_others {
            Some(self.split_other_channels(&backup)?)
        } else {
            None
        };

        Ok(SplitReport {
            backup_file,
            categories,
            others,
        })
    }

    fn split_categories(&self, backup: &Backup) -> Result<SectionReport> {
        let out_dir = self.prepare_out_dir(CATEGORIES_DIR)?;
        let mut report = SectionReport::default();

        for (i, category) in backup.channels.categories.iter().enumerate() {
            match self.retained_category(category) {
                Some(category) => {
                    report.written.push(write_entity(&out_dir, i, &category)?);
                }
                None => report.skipped += 1,
            }
        }

        Ok(report)
    }

    fn split_other_channels(&self, backup: &Backup) -> Result<SectionReport> {
        let out_dir = self.prepare_out_dir(OTHER_CHANNELS_DIR)?;
        let mut report = SectionReport::default();

        for (i, channel) in backup.channels.others.iter().enumerate() {
            if self.options.filter_public && !channel.is_public() {
                report.skipped += 1;
                continue;
            }
            report.written.push(write_entity(&out_dir, i, channel)?);
        }

        Ok(report)
    }

    /// Apply the visibility filter to one category. `None` means omit it:
    /// either the category itself is not public, or none of its children are.
    fn retained_category(&self, category: &Category) -> Option<Category> {
        if !self.options.filter_public {
            return Some(category.clone());
        }

        if !category.is_public() {
            return None;
        }

        let filtered = category.with_public_children();
        if filtered.children.is_empty() {
            return None;
        }

        Some(filtered)
    }

    fn prepare_out_dir(&self, name: &str) -> Result<PathBuf> {
        let out_dir = self.data_dir.join(name);
        if self.options.clean_output && out_dir.exists() {
            fs::remove_dir_all(&out_dir)?;
        }
        fs::create_dir_all(&out_dir)?;
        Ok(out_dir)
    }
}

/// Pretty-printed, 2-space-indented JSON, one object per file
fn write_entity<T: serde::Serialize>(out_dir: &Path, index: usize, entity: &T) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.json", index));
    let content = serde_json::to_string_pretty(entity).map_err(std::io::Error::from)?;
    fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn write_backup(dir: &Path, doc: &Value) {
        fs::write(
            dir.join("backup.json"),
            serde_json::to_string_pretty(doc).unwrap(),
        )
        .unwrap();
    }

    fn private_perms() -> Value {
        json!([{"roleName": "@everyone", "allow": "0"}])
    }

    fn public_perms() -> Value {
        json!([{"roleName": "@everyone", "allow": "1024"}])
    }

    /// A public, B private, C public with no public children: only 0.json
    #[test]
    fn splits_categories_by_visibility() {
        let tmp = TempDir::new().unwrap();
        let doc = json!({
            "channels": {
                "categories": [
                    {
                        "name": "A",
                        "permissions": [],
                        "children": [
                            {"name": "a1", "permissions": []},
                            {"name": "a2", "permissions": public_perms()}
                        ]
                    },
                    {
                        "name": "B",
                        "permissions": private_perms(),
                        "children": [
                            {"name": "b1", "permissions": []}
                        ]
                    },
                    {
                        "name": "C",
                        "permissions": [],
                        "children": [
                            {"name": "c1", "permissions": private_perms()}
                        ]
                    }
                ],
                "others": []
            }
        });
        write_backup(tmp.path(), &doc);

        let report = Splitter::new(tmp.path(), SplitOptions::default())
            .run()
            .unwrap();

        assert_eq!(report.categories.written.len(), 1);
        assert_eq!(report.categories.skipped, 2);
        assert!(report.others.is_none());

        let out = tmp.path().join("categories");
        assert!(out.join("0.json").exists());
        assert!(!out.join("1.json").exists());
        assert!(!out.join("2.json").exists());

        let written: Value =
            serde_json::from_str(&fs::read_to_string(out.join("0.json")).unwrap()).unwrap();
        assert_eq!(written["name"], "A");
        let children = written["children"].as_array().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0]["name"], "a1");
        assert_eq!(children[1]["name"], "a2");
    }

    /// Entity at source position i is always written as i.json
    #[test]
    fn indices_track_source_positions() {
        let tmp = TempDir::new().unwrap();
        let doc = json!({
            "channels": {
                "categories": [
                    {"name": "0", "permissions": private_perms(), "children": []},
                    {"name": "1", "permissions": [], "children": [
                        {"name": "kept", "permissions": []}
                    ]}
                ],
                "others": []
            }
        });
        write_backup(tmp.path(), &doc);

        let report = Splitter::new(tmp.path(), SplitOptions::default())
            .run()
            .unwrap();

        assert_eq!(report.categories.written.len(), 1);
        let out = tmp.path().join("categories");
        assert!(!out.join("0.json").exists());
        assert!(out.join("1.json").exists());
    }

    #[test]
    fn unfiltered_run_writes_everything_unmodified() {
        let tmp = TempDir::new().unwrap();
        let doc = json!({
            "channels": {
                "categories": [
                    {"name": "hidden", "permissions": private_perms(), "children": [
                        {"name": "secret", "permissions": private_perms()}
                    ]},
                    {"name": "empty", "permissions": [], "children": []}
                ],
                "others": []
            }
        });
        write_backup(tmp.path(), &doc);

        let options = SplitOptions {
            filter_public: false,
            ..SplitOptions::default()
        };
        let report = Splitter::new(tmp.path(), options).run().unwrap();

        assert_eq!(report.categories.written.len(), 2);
        assert_eq!(report.categories.skipped, 0);

        let written: Value = serde_json::from_str(
            &fs::read_to_string(tmp.path().join("categories/0.json")).unwrap(),
        )
        .unwrap();
        // Private children are kept when filtering is off
        assert_eq!(written["children"][0]["name"], "secret");
    }

    #[test]
    fn other_channels_pass_is_opt_in() {
        let tmp = TempDir::new().unwrap();
        let doc = json!({
            "channels": {
                "categories": [],
                "others": [
                    {"name": "lobby", "permissions": []},
                    {"name": "staff", "permissions": private_perms()}
                ]
            }
        });
        write_backup(tmp.path(), &doc);

        let report = Splitter::new(tmp.path(), SplitOptions::default())
            .run()
            .unwrap();
        assert!(report.others.is_none());
        assert!(!tmp.path().join("other_channels").exists());

        let options = SplitOptions {
            include_others: true,
            ..SplitOptions::default()
        };
        let report = Splitter::new(tmp.path(), options).run().unwrap();

        let others = report.others.unwrap();
        assert_eq!(others.written.len(), 1);
        assert_eq!(others.skipped, 1);
        assert!(tmp.path().join("other_channels/0.json").exists());
        assert!(!tmp.path().join("other_channels/1.json").exists());
    }

    #[test]
    fn clean_output_removes_stale_indices() {
        let tmp = TempDir::new().unwrap();
        let doc = json!({
            "channels": {
                "categories": [
                    {"name": "only", "permissions": [], "children": [
                        {"name": "kept", "permissions": []}
                    ]}
                ],
                "others": []
            }
        });
        write_backup(tmp.path(), &doc);

        // Leftover from a previous, larger run
        let out = tmp.path().join("categories");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("7.json"), "{}").unwrap();

        Splitter::new(tmp.path(), SplitOptions::default())
            .run()
            .unwrap();
        assert!(out.join("0.json").exists());
        assert!(!out.join("7.json").exists());

        // Opting out preserves the old append-only behavior
        fs::write(out.join("7.json"), "{}").unwrap();
        let options = SplitOptions {
            clean_output: false,
            ..SplitOptions::default()
        };
        Splitter::new(tmp.path(), options).run().unwrap();
        assert!(out.join("7.json").exists());
    }

    /// Reading a produced file back yields the filtered in-memory value
    #[test]
    fn written_file_round_trips() {
        let tmp = TempDir::new().unwrap();
        let doc = json!({
            "channels": {
                "categories": [
                    {
                        "name": "A",
                        "position": 0,
                        "permissions": public_perms(),
                        "children": [
                            {"name": "kept", "topic": "t", "permissions": []},
                            {"name": "dropped", "permissions": private_perms()}
                        ]
                    }
                ],
                "others": []
            }
        });
        write_backup(tmp.path(), &doc);

        Splitter::new(tmp.path(), SplitOptions::default())
            .run()
            .unwrap();

        let expected = json!({
            "name": "A",
            "position": 0,
            "permissions": public_perms(),
            "children": [
                {"name": "kept", "topic": "t", "permissions": []}
            ]
        });
        let written: Value = serde_json::from_str(
            &fs::read_to_string(tmp.path().join("categories/0.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(written, expected);
    }
}
