use nullify::Describe;

#[derive(Describe)]
#[describe(rename = "")]
struct Test {
    value: u32,
}

fn main() {}
