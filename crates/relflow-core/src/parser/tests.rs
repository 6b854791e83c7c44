use super::*;
use crate::model::StringOrList;

#[test]
fn test_parse_full_docker_block() {
    let kdl = r#"
        project "myapp"

        docker {
            enabled #true
            image "alpine"
            version "3.18"
            maintainer "Jane <jane@example.com>"
            copy_rel "COPY rel /opt/rel"
            pre_copy "RUN apk add --no-cache bash"
            post_copy "EXPOSE 4000"
            entrypoint_args "foreground"
            tag "myapp:1.0.0"
            build_tool "podman"
        }
    "#;

    let project = parse_kdl_string(kdl, "fallback".to_string()).unwrap();
    assert_eq!(project.name, "myapp");

    let docker = &project.docker;
    assert!(docker.is_enabled());
    assert_eq!(docker.image(), "alpine");
    assert_eq!(docker.version.as_deref(), Some("3.18"));
    assert_eq!(docker.maintainer.as_deref(), Some("Jane <jane@example.com>"));
    assert_eq!(docker.copy_rel(), "COPY rel /opt/rel");
    assert_eq!(
        docker.pre_copy.as_deref(),
        Some("RUN apk add --no-cache bash")
    );
    assert_eq!(docker.post_copy.as_deref(), Some("EXPOSE 4000"));
    assert_eq!(docker.entrypoint, None);
    assert_eq!(
        docker.entrypoint_args,
        Some(StringOrList::Single("foreground".to_string()))
    );
    assert_eq!(docker.tag.as_deref(), Some("myapp:1.0.0"));
    assert_eq!(docker.build_tool(), "podman");
}

#[test]
fn test_parse_without_project_uses_default_name() {
    let kdl = r#"
        docker {
            image "debian"
        }
    "#;

    let project = parse_kdl_string(kdl, "release-dir".to_string()).unwrap();
    assert_eq!(project.name, "release-dir");
    assert!(!project.docker.is_enabled());
}

#[test]
fn test_parse_without_docker_block() {
    let project = parse_kdl_string(r#"project "bare""#, "x".to_string()).unwrap();
    assert_eq!(project.docker, Default::default());
    assert_eq!(project.docker.image(), "centos");
}

#[test]
fn test_parse_entrypoint_list() {
    let kdl = r#"
        docker {
            entrypoint "/bin/sh" "-c" "exec /rel/app/bin/app foreground"
            entrypoint_args "a" "b"
        }
    "#;

    let project = parse_kdl_string(kdl, "app".to_string()).unwrap();
    assert_eq!(
        project.docker.entrypoint,
        Some(StringOrList::List(vec![
            "/bin/sh".to_string(),
            "-c".to_string(),
            "exec /rel/app/bin/app foreground".to_string(),
        ]))
    );
    assert_eq!(
        project.docker.entrypoint_args,
        Some(StringOrList::List(vec!["a".to_string(), "b".to_string()]))
    );
}

#[test]
fn test_parse_non_string_value_is_error() {
    let kdl = r#"
        docker {
            version 18
        }
    "#;

    let result = parse_kdl_string(kdl, "app".to_string());
    match result {
        Err(FlowError::ExpectedString { key }) => assert_eq!(key, "version"),
        other => panic!("Expected ExpectedString error, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_project_name_is_error() {
    let result = parse_kdl_string(r#"project """#, "app".to_string());
    assert!(matches!(result, Err(FlowError::InvalidConfig(_))));
}

#[test]
fn test_parse_invalid_kdl() {
    let result = parse_kdl_string("docker {", "app".to_string());
    assert!(matches!(result, Err(FlowError::KdlParse(_))));
}

#[test]
fn test_parse_unknown_nodes_are_ignored() {
    let kdl = r#"
        project "app"
        release { include_erts #true }
        docker {
            image "alpine"
            healthcheck "curl localhost"
        }
    "#;

    let project = parse_kdl_string(kdl, "x".to_string()).unwrap();
    assert_eq!(project.docker.image(), "alpine");
}

#[test]
fn test_parse_kdl_file_uses_directory_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let project_dir = temp_dir.path().join("shop");
    std::fs::create_dir(&project_dir).unwrap();
    let file = project_dir.join("relflow.kdl");
    std::fs::write(&file, "docker { image \"alpine\" }").unwrap();

    let project = parse_kdl_file(&file).unwrap();
    assert_eq!(project.name, "shop");
}

#[test]
fn test_parse_kdl_file_in_hidden_dir_uses_project_dir_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let hidden = temp_dir.path().join("shop").join(".relflow");
    std::fs::create_dir_all(&hidden).unwrap();
    let file = hidden.join("relflow.kdl");
    std::fs::write(&file, "docker { }").unwrap();

    let project = parse_kdl_file(&file).unwrap();
    assert_eq!(project.name, "shop");
}
