/// Material resolved during assembly. Submeshes sharing a material name
/// share one entry, so the backend creates each texture once.
#[derive(Debug, Clone)]
pub struct SceneMaterial {
    pub name: String,
    /// Index into the decoded texture list for the diffuse map, if any.
    pub diffuse: Option<usize>,
}
