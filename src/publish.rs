//! Flattening parsed properties into a prefixed, single-valued namespace

use rpmprops_spec::PropertyStore;
use std::collections::BTreeMap;
use std::io::Write;

pub const DEFAULT_PREFIX: &str = "rpm";

fn qualify(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

/// One `<prefix>.<key>` entry per key; a key with several values publishes its last one.
pub fn publish(props: &PropertyStore, prefix: &str) -> BTreeMap<String, String> {
    props
        .keys()
        .filter_map(|key| Some((qualify(prefix, key), props.last(key)?.to_owned())))
        .collect()
}

/// Writes published properties as `name=value` lines.
pub fn write_properties<W: Write>(mut w: W, published: &BTreeMap<String, String>) -> std::io::Result<()> {
    for (name, value) in published {
        writeln!(w, "{name}={value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpmprops_spec::SpecParser;

    #[test]
    fn prefixed_last_value_wins() {
        let mut props = PropertyStore::new();
        props.insert("name", "foo");
        props.insert("requires", "a");
        props.insert("requires", "b");

        let out = publish(&props, "rpm");
        assert_eq!(out.len(), 2);
        assert_eq!(out["rpm.name"], "foo");
        assert_eq!(out["rpm.requires"], "b");
    }

    #[test]
    fn custom_and_empty_prefix() {
        let mut props = PropertyStore::new();
        props.insert("version", "1.1");
        assert_eq!(publish(&props, "pkg.main")["pkg.main.version"], "1.1");
        assert_eq!(publish(&props, "")["version"], "1.1");
    }

    #[test]
    fn spec_file_to_properties_text() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"Name: p4bugzilla\nVersion: 1.1\nRelease: 1\nProvides: %{name}-%{version}-%{release}\nBuildArch: noarch\n")
            .unwrap();
        let props = SpecParser::new(f.path()).parse().unwrap();

        let mut buf = Vec::new();
        write_properties(&mut buf, &publish(&props, DEFAULT_PREFIX)).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "rpm.buildarch=noarch\n\
             rpm.name=p4bugzilla\n\
             rpm.provides=p4bugzilla-1.1-1\n\
             rpm.release=1\n\
             rpm.version=1.1\n"
        );
    }
}
