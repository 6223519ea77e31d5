use anyhow::Result;
use component_css_etl::config::toml_config::TomlConfig;
use component_css_etl::core::Pipeline;
use component_css_etl::{CliConfig, CssPipeline, EtlEngine, LocalStorage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_component(root: &Path, relative: &str, contents: &[u8]) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

fn setup_components(root: &Path) -> Result<()> {
    write_component(
        root,
        "Button.svelte",
        br#"<script>
  export let label;
</script>

<button class="btn">{label}</button>

<style lang="postcss">
  /* primary button */
  .btn {
    color: var(--fg-button);
    padding: 4px 8px;
    color: white;
  }
  .btn:hover { color: var(--fg-hover); }
</style>
"#,
    )?;
    write_component(
        root,
        "layout/Header.svelte",
        b"<header><slot/></header>\n<style>\n  header { display: flex; gap: 1rem; }\n  header { margin: 0; }\n</style>\n",
    )?;
    write_component(root, "layout/Spacer.svelte", b"<div class=\"spacer\"></div>\n")?;
    write_component(root, "Broken.svelte", &[0x3c, 0x73, 0xff, 0xfe, 0x3e])?;
    write_component(root, "README.md", b"<style>.readme { color: red; }</style>")?;
    Ok(())
}

fn cli_config(components: &Path, output: &Path, formats: &str) -> CliConfig {
    CliConfig {
        components_path: components.to_string_lossy().into_owned(),
        output_path: output.to_string_lossy().into_owned(),
        extensions: vec!["svelte".to_string()],
        formats: formats.split(',').map(str::to_string).collect(),
        top: 20,
        top_components: 15,
        config: None,
        dry_run: false,
        verbose: false,
    }
}

fn pipeline(
    config: CliConfig,
) -> CssPipeline<LocalStorage, LocalStorage, CliConfig> {
    let source = LocalStorage::new(config.components_path.clone());
    let output = LocalStorage::new(config.output_path.clone());
    CssPipeline::new(source, output, config)
}

#[tokio::test]
async fn test_end_to_end_extraction() -> Result<()> {
    let components = TempDir::new()?;
    let output = TempDir::new()?;
    setup_components(components.path())?;

    let config = cli_config(components.path(), output.path(), "json,csv,markdown");
    let engine = EtlEngine::new(pipeline(config));
    let outcome = engine.run().await?;

    assert_eq!(outcome.output_path, output.path().to_string_lossy());
    let metadata = &outcome.statistics.metadata;
    assert_eq!(metadata.total_components, 4);
    assert_eq!(metadata.components_with_styles, 2);
    assert_eq!(
        metadata.css_properties,
        vec!["color", "display", "gap", "margin", "padding"]
    );

    for name in [
        "css_extraction_results.json",
        "css_properties_by_component.csv",
        "components_by_css_properties.csv",
        "component_summary.csv",
        "detailed_css_rules.csv",
        "css_custom_properties.csv",
        "CSS_Analysis_Summary.md",
    ] {
        assert!(output.path().join(name).exists(), "missing {}", name);
    }

    Ok(())
}

#[tokio::test]
async fn test_results_json_contents() -> Result<()> {
    let components = TempDir::new()?;
    let output = TempDir::new()?;
    setup_components(components.path())?;

    let config = cli_config(components.path(), output.path(), "json");
    EtlEngine::new(pipeline(config)).run().await?;

    let data = fs::read(output.path().join("css_extraction_results.json"))?;
    let json: serde_json::Value = serde_json::from_slice(&data)?;

    let button = &json["components"]["Button"];
    assert_eq!(button["has_styles"], true);
    assert_eq!(button["relative_path"], "Button.svelte");
    assert_eq!(button["rules"].as_array().map(Vec::len), Some(2));
    assert_eq!(button["rules"][0]["declarations"][0]["property"], "color");
    assert_eq!(button["rules"][0]["declarations"][0]["value"], "white");

    let header = &json["components"]["Header"];
    assert_eq!(header["rules"][0]["selector"], "header");
    assert_eq!(header["rules"][1]["selector"], "header");

    let broken = &json["components"]["Broken"];
    assert_eq!(broken["has_styles"], false);
    assert!(broken["error"].as_str().is_some_and(|e| e.contains("UTF-8")));

    let spacer = &json["components"]["Spacer"];
    assert_eq!(spacer["has_styles"], false);
    assert!(spacer.get("raw_style").is_none());
    assert!(spacer.get("error").is_none());

    Ok(())
}

#[tokio::test]
async fn test_matrix_csv_files() -> Result<()> {
    let components = TempDir::new()?;
    let output = TempDir::new()?;
    setup_components(components.path())?;

    let config = cli_config(components.path(), output.path(), "csv");
    EtlEngine::new(pipeline(config)).run().await?;

    let mut reader = csv::Reader::from_path(output.path().join("css_properties_by_component.csv"))?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    assert_eq!(headers, vec!["CSS Property", "Broken", "Button", "Header", "Spacer"]);

    let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    let color = rows.iter().find(|row| &row[0] == "color").expect("color row");
    assert_eq!(&color[2], ".btn: white | .btn:hover: var(--fg-hover)");
    assert_eq!(&color[3], "");

    let mut reader =
        csv::Reader::from_path(output.path().join("components_by_css_properties.csv"))?;
    let names: Vec<String> = reader
        .records()
        .map(|row| row.map(|row| row[0].to_string()))
        .collect::<std::result::Result<_, _>>()?;
    assert_eq!(names, vec!["Button", "Header"]);

    let tokens = fs::read_to_string(output.path().join("css_custom_properties.csv"))?;
    assert!(tokens.contains("Button,.btn:hover,color,--fg-hover,var(--fg-hover),Button.svelte"));
    assert!(!tokens.contains("--fg-button"));

    Ok(())
}

#[tokio::test]
async fn test_markdown_summary() -> Result<()> {
    let components = TempDir::new()?;
    let output = TempDir::new()?;
    setup_components(components.path())?;

    let config = cli_config(components.path(), output.path(), "markdown");
    EtlEngine::new(pipeline(config)).run().await?;

    let summary = fs::read_to_string(output.path().join("CSS_Analysis_Summary.md"))?;
    assert!(summary.contains("- **Total Components**: 4"));
    assert!(summary.contains("- **Components with Styles**: 2"));
    assert!(summary.contains("- `--fg-hover`"));
    assert!(summary.contains("**layout/** (1/2 with styles)"));
    assert!(!output.path().join("css_extraction_results.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_toml_config_pipeline() -> Result<()> {
    let components = TempDir::new()?;
    let output = TempDir::new()?;
    setup_components(components.path())?;
    write_component(components.path(), "extra/Legacy.vue", b"<style>.legacy { float: left; }</style>")?;

    let content = format!(
        r#"
[project]
name = "toml-test"

[source]
components_path = "{}"
extensions = ["svelte", "vue"]

[load]
output_path = "{}"
output_formats = ["json"]

[load.filenames]
results = "styles.json"
"#,
        components.path().to_string_lossy().replace('\\', "/"),
        output.path().to_string_lossy().replace('\\', "/")
    );
    let config_path = components.path().join("css-etl.toml");
    fs::write(&config_path, content)?;
    let config = TomlConfig::from_file(&config_path)?;

    let source = LocalStorage::new(config.source.components_path.clone());
    let sink = LocalStorage::new(config.load.output_path.clone());
    let pipeline = CssPipeline::new(source, sink, config);

    let registry = pipeline.extract().await?;
    assert!(registry.get("Legacy").is_some_and(|record| record.has_styles));
    assert_eq!(registry.len(), 5);

    let result = pipeline.transform(registry).await?;
    pipeline.load(result).await?;
    assert!(output.path().join("styles.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_missing_components_directory_fails() -> Result<()> {
    let output = TempDir::new()?;
    let missing = output.path().join("does-not-exist");

    let config = cli_config(&missing, output.path(), "json");
    let result = EtlEngine::new(pipeline(config)).run().await;

    assert!(result.is_err());
    Ok(())
}
