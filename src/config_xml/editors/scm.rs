use crate::config_xml::document::{ConfigDocument, NodeId};
use crate::config_xml::editors::append_bool;
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{require, ConfigPath};

const GIT_SCM_CLASS: &str = "hudson.plugins.git.GitSCM";
const SUBVERSION_SCM_CLASS: &str = "hudson.scm.SubversionSCM";
const CVS_SCM_CLASS: &str = "hudson.scm.CVSSCM";
const NULL_SCM_CLASS: &str = "hudson.scm.NullSCM";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitScm {
    pub url: String,
    /// defaults to `**` (any branch)
    pub branch: Option<String>,
    pub credentials_id: Option<String>,
    /// defaults to `Default`
    pub git_tool: Option<String>,
    pub relative_target_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvsScm {
    pub cvsroot: String,
    pub module: String,
    pub branch: Option<String>,
    pub tag: Option<String>,
    pub use_head_if_tag_not_found: bool,
}

/// # Scm spec
///
/// Source checkout block of a freestyle job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScmSpec {
    Git(GitScm),
    Subversion { url: String },
    Cvs(CvsScm),
}

impl ScmSpec {
    /// Builds a spec from a `git` / `subversion` / `cvs` keyword.
    ///
    /// For cvs, `url` is the cvsroot and `branch` the module branch.
    pub fn from_keyword(
        provider: &str,
        url: &str,
        branch: Option<&str>,
    ) -> Result<Self, ConfigEditError> {
        if url.trim().is_empty() {
            return Err(ConfigEditError::InvalidArgument {
                name: "scm url",
                value: url.to_string(),
                expected: "a repository url",
            });
        }

        match provider {
            "git" => Ok(ScmSpec::Git(GitScm {
                url: url.to_string(),
                branch: branch.map(|b| b.to_string()),
                credentials_id: None,
                git_tool: None,
                relative_target_dir: None,
            })),
            "subversion" => Ok(ScmSpec::Subversion {
                url: url.to_string(),
            }),
            "cvs" => Ok(ScmSpec::Cvs(CvsScm {
                cvsroot: url.to_string(),
                module: String::new(),
                branch: branch.map(|b| b.to_string()),
                tag: None,
                use_head_if_tag_not_found: false,
            })),
            _ => Err(ConfigEditError::InvalidArgument {
                name: "scm provider",
                value: provider.to_string(),
                expected: "git, subversion, cvs",
            }),
        }
    }
}

/// # set scm
///
/// Replaces the job's `scm` block with `spec`, keeping its position.
pub fn set_scm(doc: &mut ConfigDocument, spec: &ScmSpec) -> Result<(), ConfigEditError> {
    let old = require(doc, ConfigPath::Scm, "set_scm replaces an existing scm block")?;
    let new = doc.insert_element_after(old, ConfigPath::Scm.tag())?;
    write_scm(doc, new, Some(spec));
    doc.remove(old);
    Ok(())
}

/// Appends a complete `scm` block to `parent`, `NullSCM` when `spec` is `None`.
pub(crate) fn append_scm(
    doc: &mut ConfigDocument,
    parent: NodeId,
    spec: Option<&ScmSpec>,
) -> NodeId {
    let scm = doc.append_element(parent, ConfigPath::Scm.tag());
    write_scm(doc, scm, spec);
    scm
}

fn write_scm(doc: &mut ConfigDocument, scm: NodeId, spec: Option<&ScmSpec>) {
    match spec {
        None => doc.set_attribute(scm, "class", NULL_SCM_CLASS),
        Some(ScmSpec::Git(git)) => write_git(doc, scm, git),
        Some(ScmSpec::Subversion { url }) => write_subversion(doc, scm, url),
        Some(ScmSpec::Cvs(cvs)) => write_cvs(doc, scm, cvs),
    }
}

fn write_git(doc: &mut ConfigDocument, scm: NodeId, git: &GitScm) {
    doc.set_attribute(scm, "class", GIT_SCM_CLASS);
    doc.append_text_element(scm, "configVersion", "2");

    let remotes = doc.append_element(scm, "userRemoteConfigs");
    let remote = doc.append_element(remotes, "hudson.plugins.git.UserRemoteConfig");
    doc.append_element(remote, "name");
    doc.append_element(remote, "refspec");
    doc.append_text_element(
        remote,
        "credentialsId",
        git.credentials_id.as_deref().unwrap_or_default(),
    );
    doc.append_text_element(remote, "url", &git.url);

    let branches = doc.append_element(scm, "branches");
    let branch = doc.append_element(branches, "hudson.plugins.git.BranchSpec");
    doc.append_text_element(branch, "name", git.branch.as_deref().unwrap_or("**"));

    for flag in [
        "disableSubmodules",
        "recursiveSubmodules",
        "doGenerateSubmoduleConfigurations",
        "authorOrCommitter",
        "clean",
        "wipeOutWorkspace",
        "pruneBranches",
        "remotePoll",
        "ignoreNotifyCommit",
        "useShallowClone",
    ] {
        append_bool(doc, scm, flag, false);
    }

    let chooser = doc.append_element(scm, "buildChooser");
    doc.set_attribute(chooser, "class", "hudson.plugins.git.util.DefaultBuildChooser");
    doc.append_text_element(scm, "gitTool", git.git_tool.as_deref().unwrap_or("Default"));
    let submodule_cfg = doc.append_element(scm, "submoduleCfg");
    doc.set_attribute(submodule_cfg, "class", "list");
    doc.append_text_element(
        scm,
        "relativeTargetDir",
        git.relative_target_dir.as_deref().unwrap_or_default(),
    );
    for empty in [
        "reference",
        "excludedRegions",
        "excludedUsers",
        "gitConfigName",
        "gitConfigEmail",
    ] {
        doc.append_element(scm, empty);
    }
    append_bool(doc, scm, "skipTag", false);
    doc.append_element(scm, "includedRegions");
    doc.append_element(scm, "scmName");
}

fn write_subversion(doc: &mut ConfigDocument, scm: NodeId, url: &str) {
    doc.set_attribute(scm, "class", SUBVERSION_SCM_CLASS);

    let locations = doc.append_element(scm, "locations");
    let location = doc.append_element(locations, "hudson.scm.SubversionSCM_-ModuleLocation");
    doc.append_text_element(location, "remote", url);
    doc.append_text_element(location, "local", ".");

    for empty in [
        "excludedRegions",
        "includedRegions",
        "excludedUsers",
        "excludedRevprop",
        "excludedCommitMessages",
    ] {
        doc.append_element(scm, empty);
    }
    let updater = doc.append_element(scm, "workspaceUpdater");
    doc.set_attribute(updater, "class", "hudson.scm.subversion.UpdateUpdater");
}

fn write_cvs(doc: &mut ConfigDocument, scm: NodeId, cvs: &CvsScm) {
    doc.set_attribute(scm, "class", CVS_SCM_CLASS);
    doc.append_text_element(scm, "cvsroot", &cvs.cvsroot);
    doc.append_text_element(scm, "module", &cvs.module);
    // the tag stands in for the branch when none is given
    let branch = cvs
        .branch
        .as_deref()
        .or(cvs.tag.as_deref())
        .unwrap_or_default();
    doc.append_text_element(scm, "branch", branch);
    append_bool(doc, scm, "canUseUpdate", true);
    append_bool(doc, scm, "useHeadIfNotFound", cvs.use_head_if_tag_not_found);
    append_bool(doc, scm, "flatten", true);
    append_bool(doc, scm, "isTag", cvs.tag.is_some());
    doc.append_element(scm, "excludedRegions");
}
