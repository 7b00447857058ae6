//! Throwaway fact and inventory trees, laid out the way `ansible -m setup
//! --tree` and a typical inventory checkout would leave them.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tempfile::TempDir;

pub struct Fixture {
    root: TempDir,
}

impl Fixture {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            root: tempfile::tempdir().context("cannot create fixture dir")?,
        })
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path: PathBuf = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("cannot write {}", path.display()))?;
        Ok(path)
    }

    #[cfg(unix)]
    pub fn write_executable(&self, relative: &str, contents: &str) -> anyhow::Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let path: PathBuf = self.write(relative, contents)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("cannot chmod {}", path.display()))?;
        Ok(path)
    }
}

const DEBIAN_SETUP: &str = r#"{
    "ansible_facts": {
        "ansible_hostname": "debian",
        "ansible_fqdn": "debian.dev.local",
        "ansible_distribution": "Debian",
        "ansible_env": {"EDITOR": "vim", "HOME": "/root", "SHELL": "/bin/bash"}
    },
    "changed": false
}"#;

const DEBIAN_EXTEND: &str = r#"{
    "ansible_facts": {
        "ansible_env": {"EDITOR": "nano"}
    },
    "software": ["Apache2", "MySQL5.5"]
}"#;

/// `out_setup/` with gathered facts and `extend/` with hand-written overrides.
pub fn extend() -> anyhow::Result<Fixture> {
    let fixture = Fixture::new()?;
    fixture.write("out_setup/debian.dev.local", DEBIAN_SETUP)?;
    fixture.write("extend/debian.dev.local", DEBIAN_EXTEND)?;
    Ok(fixture)
}

pub const HOSTPARSE_HOSTS: &str = r#"# Hosts without a group
bastion.dev.local

[db]
db.dev.local function=db

[web]
web[01-03].dev.local function=web

[dev:children]
db
web

[dev:vars]
dtap=dev

[dev_local:children]
dev
"#;

/// `out/` facts plus the same inventory as a single file and split over a
/// directory. `cache/` holds fact-cache facts and `extend/` extension keys
/// for `db.dev.local`.
pub fn hostparse() -> anyhow::Result<Fixture> {
    let fixture = Fixture::new()?;
    for host in ["db.dev.local", "web01.dev.local", "web02.dev.local"] {
        let short: &str = host.split('.').next().unwrap_or(host);
        fixture.write(
            &format!("out/{host}"),
            &format!(r#"{{"ansible_facts": {{"ansible_hostname": "{short}", "ansible_fqdn": "{host}"}}}}"#),
        )?;
    }

    fixture.write("hosts", HOSTPARSE_HOSTS)?;

    fixture.write("hostsdir/10-hosts", "[db]\ndb.dev.local function=db\n\n[web]\nweb[01-03].dev.local\n")?;
    fixture.write(
        "hostsdir/20-groups",
        "[dev:children]\ndb\nweb\n\n[dev:vars]\ndtap=dev\n\n[dev_local:children]\ndev\n",
    )?;
    fixture.write("hostsdir/20-groups.bak", "[this is not parsed\n")?;
    fixture.write("hostsdir/group_vars/web.yml", "---\nhttp_port: 8080\n")?;
    fixture.write("hostsdir/host_vars/db.dev.local.yml", "backup: true\n")?;

    fixture.write(
        "cache/db.dev.local",
        r#"{"ansible_hostname": "db", "ansible_env": {"EDITOR": "vim"}}"#,
    )?;
    fixture.write("extend/db.dev.local", r#"{"software": ["Apache2"]}"#)?;
    Ok(fixture)
}

/// Fact-cache layout: one JSON object of bare facts per host.
pub fn factcache() -> anyhow::Result<Fixture> {
    let fixture = Fixture::new()?;
    fixture.write(
        "out/debian.dev.local",
        r#"{
    "ansible_hostname": "debian",
    "ansible_env": {"EDITOR": "vim", "HOME": "/root"},
    "ansible_distribution": "Debian",
    "module_setup": true
}"#,
    )?;
    fixture.write("hosts", "[dev]\ndebian.dev.local\n\n[dev:vars]\ndtap=dev\n")?;
    Ok(fixture)
}

pub const DYNINV_LIST: &str = r#"{
    "atlanta": {
        "hosts": ["host1.example.com", "host2.example.com", "host5.example.com"],
        "vars": {"b": true, "ntp_server": "ntp.atlanta.example.com"}
    },
    "raleigh": ["host2.example.com", "host5.example.com"],
    "southeast": {
        "children": ["atlanta", "raleigh"],
        "vars": {"halon_system_timeout": 30}
    },
    "_meta": {
        "hostvars": {
            "host5.example.com": {"b": false, "ansible_port": 2222}
        }
    }
}"#;

/// A shell dynamic inventory answering `--list` with [`DYNINV_LIST`].
#[cfg(unix)]
pub fn dyninv() -> anyhow::Result<Fixture> {
    let fixture = Fixture::new()?;
    fixture.write_executable(
        "dyninv.sh",
        &format!("#!/bin/sh\n[ \"$1\" = \"--list\" ] || exit 1\ncat <<'EOF'\n{DYNINV_LIST}\nEOF\n"),
    )?;
    Ok(fixture)
}
