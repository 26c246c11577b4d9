//! Loading binder options from option files and `NODEBIND_*` variables.

use std::io::Write;

use anyhow::{Result, anyhow, ensure};
use camino::Utf8PathBuf;
use nodebind::{
    BindError, BindOptions, Binder, ConfigNode, DiagnosticPolicy, Element, Target, TypeRegistry,
};
use serial_test::serial;
use tempfile::NamedTempFile;
use test_helpers::env;

#[derive(Debug, Default, Target)]
struct Pqs {
    #[bind(collection(key = "Mods", significance = "type"))]
    mods: Vec<Box<dyn Element>>,
}

fn options_file(contents: &str) -> Result<(NamedTempFile, Utf8PathBuf)> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    let path = Utf8PathBuf::from_path_buf(file.path().to_path_buf())
        .map_err(|path| anyhow!("non UTF-8 temp path {}", path.display()))?;
    Ok((file, path))
}

#[test]
#[serial]
fn environment_overrides_the_option_file() -> Result<()> {
    let (_file, path) = options_file("unknown_elements = \"deny\"\nlog_members = true\n")?;
    let lock = env::lock();
    let _log = lock.set_var("NODEBIND_LOG_MEMBERS", "false");
    let _unsupported = lock.remove_var("NODEBIND_UNSUPPORTED_FIELDS");
    let _unknown = lock.remove_var("NODEBIND_UNKNOWN_ELEMENTS");

    let options = BindOptions::load(Some(&path))?;
    ensure!(options.unknown_elements == DiagnosticPolicy::Deny);
    ensure!(options.unsupported_fields == DiagnosticPolicy::Warn);
    ensure!(!options.log_members, "environment wins over the file");
    Ok(())
}

#[test]
#[serial]
fn loaded_policies_drive_the_binder() -> Result<()> {
    let _deny = env::set_var("NODEBIND_UNKNOWN_ELEMENTS", "deny");
    let options = BindOptions::load(None)?;

    let registry = TypeRegistry::new();
    let mut binder = Binder::new(options).with_registry(&registry);
    let node = ConfigNode::new("PQS")
        .with_node(ConfigNode::new("Mods").with_node(ConfigNode::new("LandControl")));
    let err = binder
        .create::<Pqs>(&node)
        .err()
        .ok_or_else(|| anyhow!("bind should fail"))?;
    ensure!(
        matches!(&*err, BindError::UnresolvedElementType { tag, .. } if tag == "LandControl"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[test]
#[serial]
fn malformed_option_files_are_reported() -> Result<()> {
    let (_file, path) = options_file("unsupported_fields = [1, 2]\n")?;
    let _unsupported = env::remove_var("NODEBIND_UNSUPPORTED_FIELDS");
    let err = BindOptions::load(Some(&path))
        .err()
        .ok_or_else(|| anyhow!("load should fail"))?;
    ensure!(matches!(*err, BindError::Options(_)), "unexpected error: {err}");
    Ok(())
}
