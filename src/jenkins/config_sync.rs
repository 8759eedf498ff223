use crate::config_xml::document::ConfigDocument;
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::serializer::to_xml_string;
use crate::jenkins::client::JacJenkinsClient;
use crate::jenkins::error::JenkinsApiError;
use tracing::debug;

/// # edit remote config
///
/// Fetches the `config.xml` of `resource_path`, runs `edit` on the parsed
/// document and uploads the result.
///
/// Nothing is uploaded when `edit` fails or leaves the document structurally
/// unchanged. There is no versioning: a concurrent writer of the same
/// resource wins if it uploads last.
pub async fn edit_remote_config<R, F>(
    client: &JacJenkinsClient,
    resource_path: &str,
    edit: F,
) -> Result<R, JenkinsApiError>
where
    F: FnOnce(&mut ConfigDocument) -> Result<R, ConfigEditError>,
{
    let xml = client.fetch_config(resource_path).await?;
    let mut doc = ConfigDocument::parse(&xml)?;
    let before = doc.clone();

    let result = edit(&mut doc)?;

    if doc == before {
        debug!("{} unchanged, nothing to upload", resource_path);
        return Ok(result);
    }

    client.push_config(resource_path, &to_xml_string(&doc)?).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_xml::editors::job_fields::set_description;
    use crate::config_xml::editors::node_restriction::restrict_to_node;
    use crate::jenkins::test_server::TestServer;

    const JOB: &str = "<?xml version='1.1' encoding='UTF-8'?>\n<project><description>old</description><canRoam>true</canRoam></project>";

    #[tokio::test]
    async fn test_changed_document_is_posted_as_xml() {
        let server = TestServer::start(200, JOB.as_bytes().to_vec()).await;
        let client = JacJenkinsClient::local(&server.url);

        edit_remote_config(&client, "job/demo", |doc| {
            set_description(doc, "new");
            Ok(())
        })
        .await
        .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/job/demo/config.xml");
        assert!(requests[0]
            .header("authorization")
            .is_some_and(|v| v.starts_with("Basic ")));

        assert_eq!(requests[1].method, "POST");
        assert_eq!(requests[1].path, "/job/demo/config.xml");
        assert_eq!(requests[1].header("content-type"), Some("application/xml"));
        let body = String::from_utf8(requests[1].body.clone()).unwrap();
        assert!(body.contains("<description>new</description>"));
        assert!(body.contains("<canRoam>true</canRoam>"));
    }

    #[tokio::test]
    async fn test_failed_edit_uploads_nothing() {
        let server = TestServer::start(200, JOB.as_bytes().to_vec()).await;
        let client = JacJenkinsClient::local(&server.url);

        let result = edit_remote_config(&client, "job/demo", |doc| {
            restrict_to_node(doc, "agent-1")
        })
        .await;

        assert!(matches!(
            result,
            Err(JenkinsApiError::Edit(ConfigEditError::MissingElement { .. }))
        ));
        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
    }

    #[tokio::test]
    async fn test_unchanged_document_is_not_uploaded() {
        let server = TestServer::start(200, JOB.as_bytes().to_vec()).await;
        let client = JacJenkinsClient::local(&server.url);

        let listed = edit_remote_config(&client, "job/demo", |doc| {
            Ok(doc.find_first("canRoam").is_some())
        })
        .await
        .unwrap();

        assert!(listed);
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_redirect_is_a_fetch_error() {
        let server = TestServer::start(302, b"<html>login</html>".to_vec()).await;
        let client = JacJenkinsClient::local(&server.url);

        let result = edit_remote_config(&client, "job/demo", |doc| {
            set_description(doc, "new");
            Ok(())
        })
        .await;

        assert!(matches!(
            result,
            Err(JenkinsApiError::Uncategorized { .. })
        ));
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_keeps_declared_charset() {
        let mut latin1 =
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><project><description>caf".to_vec();
        latin1.push(0xE9);
        latin1.extend_from_slice(b"</description></project>");
        let server = TestServer::start(200, latin1).await;
        let client = JacJenkinsClient::local(&server.url);

        edit_remote_config(&client, "job/demo", |doc| {
            set_description(doc, "crème");
            Ok(())
        })
        .await
        .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        let body = &requests[1].body;
        assert!(body.starts_with(b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>"));
        assert!(body.windows(2).any(|w| w == [b'r', 0xE8]));
        assert!(!body.contains(&0xC3));
    }
}
