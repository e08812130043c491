fn main() -> anyhow::Result<()> {
    wshapes::run()
}
