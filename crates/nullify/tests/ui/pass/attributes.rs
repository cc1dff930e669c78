use nullify::{Describe, metadata::TypeDescriptor};

mod reexport {
    pub use nullify as renamed;
}

#[derive(Describe)]
#[describe(crate = reexport::renamed, rename = "Renamed")]
struct Config {
    #[describe(tag(json = "type", validate = "required"))]
    r#type: String,
    #[describe(tag(json = "a"), tag(xml = "b"))]
    #[describe(tag(json = "c"))]
    multi: Option<u64>,
    #[describe(skip)]
    callback: Box<dyn Fn() + Send>,
}

#[derive(Describe)]
struct Unit;

fn main() {
    let ty = Config::describe();
    let ty = ty.as_struct().unwrap();
    assert_eq!(ty.name, "Renamed");
    assert_eq!(ty.fields[0].name, "type");
    assert_eq!(ty.fields[1].tags.get("json"), Some("c"));
    assert_eq!(ty.fields[1].tags.get("xml"), Some("b"));

    assert!(matches!(Unit::describe(), TypeDescriptor::Struct(ty) if ty.fields.is_empty()));
}
