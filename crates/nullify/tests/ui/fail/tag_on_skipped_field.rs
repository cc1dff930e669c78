use nullify::Describe;

#[derive(Describe)]
struct Test {
    #[describe(skip, tag(json = "value"))]
    value: u32,
}

fn main() {}
