use nullify::Describe;

#[derive(Describe)]
struct Test {
    #[describe(flatten)]
    value: u32,
}

fn main() {}
