use relflow_core::Project;

pub fn handle(project: &Project) -> anyhow::Result<()> {
    let text = relflow_build::render(&project.docker, &project.name)?;
    print!("{}", text);
    Ok(())
}
