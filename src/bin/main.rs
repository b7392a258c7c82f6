use avl_set::AvlTree;

fn print_keys(tree: &AvlTree<u32>) {
    println!("{:?}", tree.iter().collect::<Vec<_>>());
}

fn main() -> Result<(), avl_set::Error> {
    let mut tree: AvlTree<u32> = AvlTree::new();

    for key in [1, 2, 3, 4, 5, 6, 7] {
        tree.insert(key)?;
        tree.assert_invariants();
        print_keys(&tree);
    }

    let root = tree.root().map(|r| *r.key());
    println!("root = {root:?}, height = {}", tree.height());

    if let Some(root) = root {
        tree.delete(&root)?;
        tree.assert_invariants();
        print_keys(&tree);
    }

    println!("min = {}, max = {}", tree.min()?, tree.max()?);

    let a = AvlTree::from_keys([1, 3, 5, 7])?;
    let b = AvlTree::from_keys([2, 3, 4, 5])?;
    println!("{a:?} & {b:?} = {:?}", a.intersection(&b));
    println!("{a:?} | {b:?} = {:?}", a.union(&b));

    let mut dot = String::new();
    if tree.dotgraph("demo", &mut dot).is_ok() {
        println!("{dot}");
    }

    Ok(())
}
