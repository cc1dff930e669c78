use nullify::Describe;

#[derive(Describe)]
struct Test(u32);

fn main() {}
